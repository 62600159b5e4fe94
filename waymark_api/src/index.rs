use axum::response::Html;
use minijinja::context;
use waymark_core::route_query::TravelMode;
use waymark_map::html::{PAGE_TITLE, html_environment};

use crate::error::ApiError;

const FORM_TEMPLATE: &str = "form.html";

pub async fn index_handler() -> Result<Html<String>, ApiError> {
    Ok(Html(form_page()?))
}

/// The input form. Submitting it opens `/map` with the fields as query string.
pub fn form_page() -> Result<String, minijinja::Error> {
    let environment = html_environment(FORM_TEMPLATE, include_str!("../templates/form.html"))?;
    let template = environment.get_template(FORM_TEMPLATE)?;

    let modes: Vec<(&str, &str)> = TravelMode::ALL
        .iter()
        .map(|mode| (mode.as_str(), mode.label()))
        .collect();

    let html = template.render(context! {
        title => PAGE_TITLE,
        modes => modes,
    })?;

    Ok(html)
}
