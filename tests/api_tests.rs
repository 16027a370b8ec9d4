use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use filmoteca::api::AppState;
use filmoteca::config::Config;
use filmoteca::models::NewTitle;
use http_body_util::BodyExt;
use sea_orm::ConnectionTrait;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestApp {
    app: Router,
    state: Arc<AppState>,
    tmdb: MockServer,
}

impl TestApp {
    async fn spawn() -> Self {
        let tmdb = MockServer::start().await;
        let run_id = uuid::Uuid::new_v4();
        let tmp = std::env::temp_dir();

        let mut config = Config::default();
        config.general.database_url = format!(
            "sqlite:{}",
            tmp.join(format!("filmoteca-api-{run_id}.db")).display()
        );
        config.tmdb.api_base_url = format!("{}/3", tmdb.uri());
        config.tmdb.image_base_url = format!("{}/t/p", tmdb.uri());
        config.tmdb.credentials_path = tmp
            .join(format!("filmoteca-api-{run_id}.json"))
            .display()
            .to_string();

        let state = filmoteca::api::create_app_state_from_config(config, None)
            .await
            .expect("Failed to create app state");
        let app = filmoteca::api::router(state.clone());

        Self { app, state, tmdb }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Logs in and returns the session cookie.
    async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .send(form("/login", None, &format!("usuario={username}&senha={password}")))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");

        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .expect("login sets a session cookie")
            .to_string()
    }

    async fn login_admin(&self) -> String {
        self.login("admin", "admin123").await
    }

    async fn set_api_key(&self, cookie: &str) {
        let response = self
            .send(form("/dashboard", Some(cookie), "tmdb_key=test-key"))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_request(method: &str, uri: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}

#[tokio::test]
async fn test_gated_routes_redirect_to_login() {
    let app = TestApp::spawn().await;

    for uri in ["/dashboard", "/api/filmes", "/api/serie/1", "/add_temporadas", "/metrics"] {
        let response = app.send(get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }

    let response = app.send(get("/", None)).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = TestApp::spawn().await;

    let response = app
        .send(form("/login", None, "usuario=admin&senha=wrong"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Usuário ou senha inválidos."));

    let cookie = app.login_admin().await;

    let response = app.send(get("/", Some(&cookie))).await;
    assert_eq!(location(&response), "/dashboard");

    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("admin"));

    let summary = body_json(app.send(get("/api/dashboard", Some(&cookie))).await).await;
    assert_eq!(summary["data"]["total_filmes"], 0);
    assert_eq!(summary["data"]["tmdb_key_configurada"], false);

    app.set_api_key(&cookie).await;
    let summary = body_json(app.send(get("/api/dashboard", Some(&cookie))).await).await;
    assert_eq!(summary["data"]["tmdb_key_configurada"], true);

    let response = app.send(get("/logout", Some(&cookie))).await;
    assert_eq!(location(&response), "/login");

    let response = app.send(get("/dashboard", Some(&cookie))).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_movie_listing_pagination() {
    let app = TestApp::spawn().await;
    for i in 0..120 {
        app.state
            .store()
            .add_title(&NewTitle::movie(format!("Filme {i}")))
            .await
            .unwrap();
    }
    let cookie = app.login_admin().await;

    let page = body_json(app.send(get("/api/filmes?page=2", Some(&cookie))).await).await;
    assert_eq!(page["pagina_atual"], 2);
    assert_eq!(page["total_paginas"], 3);
    assert_eq!(page["total_filmes"], 120);
    assert_eq!(page["filmes"].as_array().unwrap().len(), 50);
    assert_eq!(page["proxima_pagina"], "/api/filmes?page=3");

    let page = body_json(app.send(get("/api/filmes?page=3", Some(&cookie))).await).await;
    assert_eq!(page["filmes"].as_array().unwrap().len(), 20);
    assert!(page["proxima_pagina"].is_null());

    let page = body_json(app.send(get("/api/filmes?page=0", Some(&cookie))).await).await;
    assert_eq!(page["pagina_atual"], 1);
    assert_eq!(page["filmes"][0]["nome"], "Filme 119");
}

#[tokio::test]
async fn test_series_detail() {
    let app = TestApp::spawn().await;
    let series = app
        .state
        .store()
        .add_title(&NewTitle::series("Dark"))
        .await
        .unwrap();
    let cookie = app.login_admin().await;

    let response = app.send(get("/api/serie/9999", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let response = app
        .send(get(&format!("/api/serie/{}", series.id), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["nome"], "Dark");
    assert_eq!(body["temporadas"], serde_json::json!([]));
}

#[tokio::test]
async fn test_user_cannot_delete_itself() {
    let app = TestApp::spawn().await;
    let cookie = app.login_admin().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/usuarios",
            &cookie,
            serde_json::json!({ "usuario": "maria", "senha": "segredo123" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(json_request(
            "DELETE",
            "/api/usuarios/admin",
            &cookie,
            serde_json::Value::Null,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send(json_request(
            "DELETE",
            "/api/usuarios/maria",
            &cookie,
            serde_json::Value::Null,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let users = body_json(app.send(get("/api/usuarios", Some(&cookie))).await).await;
    let names: Vec<&str> = users["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["usuario"].as_str())
        .collect();
    assert_eq!(names, vec!["admin"]);
}

#[tokio::test]
async fn test_search_requires_api_key_and_passes_json_through() {
    let app = TestApp::spawn().await;
    let cookie = app.login_admin().await;

    let response = app
        .send(form("/pesquisar_conteudo", Some(&cookie), "query=Heat&tipo=filme"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send(get("/add_conteudo", Some(&cookie))).await;
    assert_eq!(location(&response), "/dashboard");

    app.set_api_key(&cookie).await;

    let provider_body = serde_json::json!({
        "page": 1,
        "results": [{ "id": 949, "title": "Fogo contra Fogo", "release_date": "1995-12-15" }],
        "total_pages": 1,
        "total_results": 1
    });
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "pt-BR"))
        .and(query_param("query", "Heat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body.clone()))
        .mount(&app.tmdb)
        .await;

    let response = app
        .send(form("/pesquisar_conteudo", Some(&cookie), "query=Heat&tipo=filme"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, provider_body);

    let response = app
        .send(form("/pesquisar_conteudo", Some(&cookie), "query=Heat&tipo=anime"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_and_ingest_series() {
    let app = TestApp::spawn().await;
    let cookie = app.login_admin().await;
    app.set_api_key(&cookie).await;

    Mock::given(method("GET"))
        .and(path("/3/tv/1396"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1396,
            "genres": [{ "id": 18, "name": "Drama" }, { "id": 80, "name": "Crime" }],
            "overview": "Um professor de química.",
            "backdrop_path": "/bb.jpg",
            "number_of_seasons": 2
        })))
        .mount(&app.tmdb)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/search/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "id": 1396, "name": "Breaking Bad" }]
        })))
        .mount(&app.tmdb)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/tv/1396/season/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "episodes": [
                { "episode_number": 1, "name": "Piloto", "overview": "Início", "still_path": "/s1e1.jpg" },
                { "episode_number": 2, "name": "O Gato Está no Saco", "overview": null, "still_path": null }
            ]
        })))
        .mount(&app.tmdb)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/tv/1396/season/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "episodes": [{ "episode_number": 1, "name": "Sete Trinta e Sete" }]
        })))
        .mount(&app.tmdb)
        .await;

    let response = app
        .send(form(
            "/salvar_conteudo",
            Some(&cookie),
            "titulo=Breaking+Bad&ano=2008&tipo=serie&tmdb_id=1396",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let listing = body_json(app.send(get("/api/series", Some(&cookie))).await).await;
    let row = &listing["series"][0];
    assert_eq!(row["nome"], "Breaking Bad");
    assert_eq!(row["genero"], "Drama, Crime");
    assert_eq!(row["banner"], "/img/bb.jpg");
    assert_eq!(row["temporadas"], 0);
    let id = row["id"].as_i64().unwrap();

    let response = app
        .send(form("/add_temporadas", Some(&cookie), &format!("serie_id={id}")))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let detail = body_json(app.send(get(&format!("/api/serie/{id}"), Some(&cookie))).await).await;
    let seasons = detail["temporadas"].as_array().unwrap();
    assert_eq!(seasons.len(), 2);
    assert_eq!(seasons[0]["numero"], 1);
    assert_eq!(seasons[0]["episodios"].as_array().unwrap().len(), 2);
    assert_eq!(seasons[0]["episodios"][0]["capa"], "/img_eps/s1e1.jpg");
    assert_eq!(seasons[0]["episodios"][1]["capa"], "");
    assert_eq!(seasons[0]["episodios"][1]["sinopse"], "");
    assert_eq!(seasons[1]["episodios"].as_array().unwrap().len(), 1);

    let listing = body_json(app.send(get("/api/series", Some(&cookie))).await).await;
    assert_eq!(listing["series"][0]["temporadas"], 2);

    let response = app
        .send(json_request(
            "DELETE",
            &format!("/api/titulos/{id}"),
            &cookie,
            serde_json::Value::Null,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = i32::try_from(id).unwrap();
    assert_eq!(app.state.store().count_seasons(id).await.unwrap(), 0);
    assert_eq!(app.state.store().count_episodes(id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_500_and_stores_nothing() {
    let app = TestApp::spawn().await;
    let cookie = app.login_admin().await;
    app.set_api_key(&cookie).await;

    Mock::given(method("GET"))
        .and(path("/3/movie/42"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.tmdb)
        .await;

    let response = app
        .send(form(
            "/salvar_conteudo",
            Some(&cookie),
            "titulo=Perdido&ano=&tipo=filme&tmdb_id=42",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["success"], false);

    let listing = body_json(app.send(get("/api/filmes", Some(&cookie))).await).await;
    assert_eq!(listing["total_filmes"], 0);
}

#[tokio::test]
async fn test_storage_failure_during_ingest_rolls_back() {
    let app = TestApp::spawn().await;
    let series = app
        .state
        .store()
        .add_title(&NewTitle::series("Fargo"))
        .await
        .unwrap();
    let cookie = app.login_admin().await;
    app.set_api_key(&cookie).await;

    Mock::given(method("GET"))
        .and(path("/3/search/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "id": 60622, "name": "Fargo" }]
        })))
        .mount(&app.tmdb)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/tv/60622"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "number_of_seasons": 2
        })))
        .mount(&app.tmdb)
        .await;
    for season in 1..=2 {
        Mock::given(method("GET"))
            .and(path(format!("/3/tv/60622/season/{season}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "episodes": [
                    { "episode_number": 1, "name": "Um" },
                    { "episode_number": 2, "name": "Dois" }
                ]
            })))
            .mount(&app.tmdb)
            .await;
    }

    // Season 1 goes in, then the first episode of season 2 aborts the write.
    app.state
        .store()
        .conn
        .execute_unprepared(
            "CREATE TRIGGER fail_episode_insert BEFORE INSERT ON episodes \
             WHEN (SELECT number FROM seasons WHERE id = NEW.season_id) = 2 \
             BEGIN SELECT RAISE(ABORT, 'disco cheio'); END;",
        )
        .await
        .unwrap();

    let response = app
        .send(form(
            "/add_temporadas",
            Some(&cookie),
            &format!("serie_id={}", series.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Erro: "), "{error}");
    assert!(error.contains("disco cheio"), "{error}");

    let store = app.state.store();
    assert_eq!(store.count_seasons(series.id).await.unwrap(), 0);
    assert_eq!(store.count_episodes(series.id).await.unwrap(), 0);
    assert_eq!(store.get_series(series.id).await.unwrap().unwrap().season_count, 0);
}

#[tokio::test]
async fn test_huge_page_is_empty() {
    let app = TestApp::spawn().await;
    app.state
        .store()
        .add_title(&NewTitle::movie("Heat"))
        .await
        .unwrap();
    let cookie = app.login_admin().await;

    let response = app
        .send(get("/api/filmes?page=9223372036854775807", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["filmes"], serde_json::json!([]));
    assert_eq!(page["total_filmes"], 1);
    assert!(page["proxima_pagina"].is_null());

    let response = app
        .send(get("/api/series?page=9223372036854775807", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["series"], serde_json::json!([]));
}

#[tokio::test]
async fn test_malformed_series_id_uses_json_errors() {
    let app = TestApp::spawn().await;
    let cookie = app.login_admin().await;

    for uri in ["/api/serie/abc", "/api/serie/99999999999", "/api/serie/0"] {
        let response = app.send(get(uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_ingest_unknown_series_is_404() {
    let app = TestApp::spawn().await;
    let cookie = app.login_admin().await;

    let response = app
        .send(form("/add_temporadas", Some(&cookie), "serie_id=777"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(form("/add_temporadas", Some(&cookie), "serie_id=abc"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_relay() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/t/p/w500/poster.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .mount(&app.tmdb)
        .await;

    let response = app.send(get("/img/poster.jpg", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF, 0xE0]);

    let response = app.send(get("/img_eps/missing.jpg", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
