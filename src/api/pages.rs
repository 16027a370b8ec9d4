//! Server-rendered pages: one form per page, everything else goes through the
//! JSON API.

use axum::response::Html;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::types::{DashboardDto, SeriesOptionDto};

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} · Filmoteca</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        text(title),
        body
    ))
}

fn nav() -> &'static str {
    "<nav><a href=\"/dashboard\">Dashboard</a> | <a href=\"/add_conteudo\">Adicionar</a> | \
     <a href=\"/add_temporadas\">Temporadas</a> | <a href=\"/logout\">Sair</a></nav>"
}

pub fn login(error: Option<&str>) -> Html<String> {
    let error = error
        .map(|e| format!("<p class=\"erro\">{}</p>", text(e)))
        .unwrap_or_default();

    layout(
        "Login",
        &format!(
            "<h1>Login</h1>\n{error}\n<form method=\"post\" action=\"/login\">\n\
             <input name=\"usuario\" placeholder=\"Usuário\" required>\n\
             <input name=\"senha\" type=\"password\" placeholder=\"Senha\" required>\n\
             <button type=\"submit\">Entrar</button>\n</form>"
        ),
    )
}

pub fn dashboard(username: &str, stats: &DashboardDto, api_key: Option<&str>) -> Html<String> {
    layout(
        "Dashboard",
        &format!(
            "{nav}\n<h1>Olá, {user}</h1>\n<ul>\n<li>Filmes: {movies}</li>\n\
             <li>Séries: {series}</li>\n</ul>\n\
             <form method=\"post\" action=\"/dashboard\">\n\
             <label>TMDb API Key <input name=\"tmdb_key\" value=\"{key}\"></label>\n\
             <button type=\"submit\">Salvar</button>\n</form>",
            nav = nav(),
            user = text(username),
            movies = stats.movie_count,
            series = stats.series_count,
            key = attr(api_key.unwrap_or_default()),
        ),
    )
}

pub fn search() -> Html<String> {
    layout(
        "Adicionar conteúdo",
        &format!(
            "{}\n<h1>Pesquisar</h1>\n<form method=\"post\" action=\"/pesquisar_conteudo\">\n\
             <input name=\"query\" required>\n<select name=\"tipo\">\n\
             <option value=\"filme\">Filme</option>\n<option value=\"serie\">Série</option>\n\
             </select>\n<button type=\"submit\">Pesquisar</button>\n</form>\n\
             <h2>Salvar</h2>\n<form method=\"post\" action=\"/salvar_conteudo\">\n\
             <input name=\"titulo\" placeholder=\"Título\" required>\n\
             <input name=\"ano\" placeholder=\"Ano\">\n\
             <input name=\"tmdb_id\" placeholder=\"TMDb ID\" required>\n<select name=\"tipo\">\n\
             <option value=\"filme\">Filme</option>\n<option value=\"serie\">Série</option>\n\
             </select>\n<button type=\"submit\">Salvar</button>\n</form>",
            nav()
        ),
    )
}

pub fn add_seasons(series: &[SeriesOptionDto]) -> Html<String> {
    let options: String = series
        .iter()
        .map(|s| format!("<option value=\"{}\">{}</option>\n", s.id, text(&s.name)))
        .collect();

    layout(
        "Temporadas",
        &format!(
            "{}\n<h1>Importar temporadas</h1>\n<form method=\"post\" action=\"/add_temporadas\">\n\
             <select name=\"serie_id\">\n{options}</select>\n\
             <button type=\"submit\">Importar</button>\n</form>",
            nav()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_error_is_escaped() {
        let Html(body) = login(Some("<b>nope</b>"));
        assert!(body.contains("&lt;b&gt;nope&lt;/b&gt;"));
        assert!(!body.contains("<b>nope</b>"));
    }

    #[test]
    fn series_names_are_escaped_in_picker() {
        let Html(body) = add_seasons(&[SeriesOptionDto {
            id: 3,
            name: "Tom & Jerry".to_string(),
        }]);
        assert!(body.contains("<option value=\"3\">Tom &amp; Jerry</option>"));
    }
}
