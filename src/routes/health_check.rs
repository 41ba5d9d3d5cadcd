use crate::util::ResponseMessage;
use actix_web::HttpResponse;

pub async fn health_check() -> HttpResponse {
    tracing::info!("Health check");
    HttpResponse::Ok().json(ResponseMessage::new("Movie catalog is up"))
}
