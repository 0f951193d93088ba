use failure::{format_err, Error};
use log::{debug, error};
use plate_lookup::recognizer::{Recognition, Recognizer};
use plate_lookup::registry::MemoryRegistry;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

pub type SharedRecognizer = Arc<Mutex<Recognizer<MemoryRegistry>>>;

#[derive(Debug)]
struct InvalidDetections;

impl warp::reject::Reject for InvalidDetections {}

pub async fn run(port: u16, recognizer: SharedRecognizer) {
    warp::serve(routes(recognizer)).run(([0, 0, 0, 0], port)).await;
}

fn routes(
    recognizer: SharedRecognizer,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::post()
        .and(warp::path!("detections"))
        .and(warp::body::json())
        .and(warp::any().map(move || recognizer.clone()))
        .and_then(|json: Value, recognizer: SharedRecognizer| async move {
            let result = handle_detections(json, recognizer).await;
            if let Err(e) = &result {
                error!("Error handling detections: {}", e);
            }
            result.map_err(|_| warp::reject::custom(InvalidDetections))
        })
        .recover(recover_invalid)
}

async fn recover_invalid(err: Rejection) -> Result<impl Reply, Rejection> {
    if err.find::<InvalidDetections>().is_some() {
        Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "error": "invalid detections" })),
            StatusCode::BAD_REQUEST,
        ))
    } else {
        Err(err)
    }
}

async fn handle_detections(json: Value, recognizer: SharedRecognizer) -> Result<impl Reply, Error> {
    let texts = detection_texts(&json)?;
    debug!("Got {} detections", texts.len());
    let recognition = recognizer
        .lock()
        .await
        .process_detections(&texts[..], Instant::now());
    let reply = match recognition {
        Recognition::Found(car) => json!({ "status": "found", "car": car.to_json() }),
        Recognition::NotFound(number) => {
            json!({ "status": "not_found", "number": number.to_string() })
        }
        Recognition::Nothing => json!({ "status": "none" }),
    };
    Ok(warp::reply::json(&reply))
}

// Detections are either plain strings or OCR blocks with a "text" field.
fn detection_texts(json: &Value) -> Result<Vec<String>, Error> {
    json["detections"]
        .as_array()
        .ok_or_else(|| format_err!("Missing detections in JSON"))?
        .iter()
        .map(|detection| match detection {
            Value::String(text) => Ok(text.clone()),
            _ => detection["text"]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| format_err!("Detection without text: {}", detection)),
        })
        .collect()
}
