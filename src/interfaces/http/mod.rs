use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::ServerSettings;

/// Body returned by `GET /`
pub const GREETING: &str =
    "Hello from the Fake News Detector Backend! Running in VS Code on macOS.";

pub fn greeting() -> &'static str {
    GREETING
}

async fn home(req: HttpRequest) -> impl Responder {
    debug!(
        path = req.path(),
        query = req.query_string(),
        "Greeting requested"
    );
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(greeting())
}

/// Register the greeter routes. Other methods on `/` get 405 from the resource.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)));
}

pub fn start_server(settings: &ServerSettings) -> Result<Server> {
    let server = HttpServer::new(|| {
        let cors = Cors::permissive(); // The frontend dev server runs on another origin

        App::new().wrap(cors).configure(configure_routes)
    })
    .bind((settings.host.as_str(), settings.port))
    .map_err(|err| {
        AppError::IoError(format!(
            "Failed to bind {}:{}: {}",
            settings.host, settings.port, err
        ))
    })?
    .run();

    info!(url = %settings.url(), "Greeter listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::{body, test};

    #[actix_web::test]
    async fn test_root_returns_greeting() {
        let app = test::init_service(App::new().configure(configure_routes)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = body::to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(bytes, GREETING.as_bytes());
        assert_eq!(
            GREETING,
            "Hello from the Fake News Detector Backend! Running in VS Code on macOS."
        );
    }

    #[actix_web::test]
    async fn test_non_get_on_root_is_method_not_allowed() {
        let app = test::init_service(App::new().configure(configure_routes)).await;
        let req = test::TestRequest::post().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[actix_web::test]
    async fn test_bind_failure_is_io_error() {
        let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: held.local_addr().unwrap().port(),
        };

        let result = start_server(&settings);
        assert!(matches!(result, Err(AppError::IoError(ref msg)) if msg.starts_with("Failed to bind")));
    }

    #[actix_web::test]
    async fn test_response_ignores_query_and_headers() {
        let app = test::init_service(App::new().configure(configure_routes)).await;
        let req = test::TestRequest::get()
            .uri("/?q=fake&page=2")
            .insert_header((header::ACCEPT, "application/json"))
            .insert_header(("X-Request-Id", "abc"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, GREETING.as_bytes());
    }

    #[actix_web::test]
    async fn test_unknown_path_is_not_found() {
        let app = test::init_service(App::new().configure(configure_routes)).await;
        let req = test::TestRequest::get().uri("/predict").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_cors_wrapped_app_still_greets() {
        let app = test::init_service(
            App::new()
                .wrap(Cors::permissive())
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
