use actix_multipart::Multipart;
use actix_web::{App, Error, HttpResponse, HttpServer, Responder, error, web};
use futures::StreamExt;
use serde::Deserialize;
use slog::info;

use crate::analysis;
use crate::config::Config;
use crate::error::AnalysisError;
use crate::utils;

#[derive(Deserialize)]
struct AnalyzeOptions {
    window: Option<usize>,
    steps: Option<usize>,
}

/// Collects the `file` field of a multipart upload, refusing bodies larger
/// than `limit` bytes.
async fn read_upload(mut payload: Multipart, limit: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    let mut received = 0usize;
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .is_none_or(|name| name == "file");

        while let Some(chunk) = field.next().await {
            let data = chunk?;
            received += data.len();
            if received > limit {
                return Err(error::ErrorPayloadTooLarge(format!(
                    "upload exceeds {} bytes",
                    limit
                )));
            }
            if is_file {
                bytes.extend_from_slice(&data);
            }
        }
    }
    Ok(bytes)
}

async fn api_analyze(
    payload: Multipart,
    query: web::Query<AnalyzeOptions>,
    config: web::Data<Config>,
) -> Result<impl Responder, Error> {
    let bytes = read_upload(payload, config.max_upload_bytes).await?;
    if bytes.is_empty() {
        return Ok(HttpResponse::BadRequest().body("missing `file` upload"));
    }

    let config = config
        .get_ref()
        .clone()
        .with_window_size(query.window)
        .with_steps_window(query.steps);

    // Decoding and the transform are CPU bound.
    let result = web::block(move || analysis::analyze_bytes(&bytes, &config)).await?;

    match result {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(err) => {
            utils::error_context(&utils::get_logger(), "analysis request failed", &err);
            Ok(bad_request(&err))
        }
    }
}

fn bad_request(err: &AnalysisError) -> HttpResponse {
    HttpResponse::BadRequest().body(err.to_string())
}

async fn api_health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/analyze", web::post().to(api_analyze))
        .route("/api/health", web::get().to(api_health));
}

// Configure and start the web server
pub async fn start_server(config: Config) -> std::io::Result<()> {
    let logger = utils::get_logger();
    info!(logger, "starting API server"; "host" => &config.host, "port" => config.port);

    let bind = (config.host.clone(), config.port);
    let data = web::Data::new(config);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
        .bind(bind)?
        .run()
        .await
}
