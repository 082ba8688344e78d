//! Page rendering
//!
//! Every view is a page: a component name plus props. Requests sent by the
//! client-side app (`X-Inertia: true`) receive the page as JSON; plain
//! browser requests receive the same props rendered to HTML, with the JSON
//! page embedded for the client to take over.

pub mod flash;
pub mod form;
pub mod index;
pub mod messages;

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::models::pagination::Paginated;
use crate::models::reservation::{ReservationFilter, ReservationInput, ReservationResource};
use crate::services::validation::ValidationErrors;

pub const INERTIA_HEADER: &str = "x-inertia";

/// Props of the reservation list page
#[derive(Debug, Clone, Serialize)]
pub struct IndexProps {
    pub reservations: Paginated<ReservationResource>,
    pub filters: ReservationFilter,
    pub flash: Flash,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Flash {
    pub success: Option<String>,
}

/// Props of the shared create/edit form
#[derive(Debug, Clone, Serialize)]
pub struct FormProps {
    /// Reservation being edited; `None` on the create form
    pub reservation: Option<ReservationResource>,
    /// Values shown in the inputs
    pub values: ReservationInput,
    /// Field name to message
    pub errors: BTreeMap<&'static str, String>,
}

impl FormProps {
    pub fn create() -> Self {
        Self {
            reservation: None,
            values: ReservationInput::blank(),
            errors: BTreeMap::new(),
        }
    }

    pub fn edit(reservation: ReservationResource, values: ReservationInput) -> Self {
        Self {
            reservation: Some(reservation),
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Attach the messages for failed fields, keeping the submitted values
    pub fn with_errors(mut self, errors: &ValidationErrors) -> Self {
        self.errors = errors
            .iter()
            .map(|(field, violation)| {
                (field.as_str(), messages::violation_message(*field, *violation))
            })
            .collect();
        self
    }

    pub fn is_edit(&self) -> bool {
        self.reservation.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Page {
    Index(IndexProps),
    Form(FormProps),
}

impl Page {
    pub fn component(&self) -> &'static str {
        match self {
            Page::Index(_) => "Reservations/Index",
            Page::Form(_) => "Reservations/Form",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Index(_) => "Reservations",
            Page::Form(props) if props.is_edit() => "Edit Reservation",
            Page::Form(_) => "New Reservation",
        }
    }

    fn render_body(&self) -> String {
        match self {
            Page::Index(props) => index::render(props),
            Page::Form(props) => form::render(props),
        }
    }
}

/// JSON page object
#[derive(Debug, Serialize)]
pub struct PageObject<'a> {
    pub component: &'static str,
    pub props: &'a Page,
    pub url: &'a str,
    pub version: Option<String>,
}

/// How the current request wants its page delivered
#[derive(Debug, Clone)]
pub struct PageContext {
    pub inertia: bool,
    pub url: String,
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let inertia = parts
            .headers
            .get(INERTIA_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Ok(Self { inertia, url })
    }
}

impl PageContext {
    pub fn render(&self, status: StatusCode, page: Page) -> Response {
        let object = PageObject {
            component: page.component(),
            props: &page,
            url: &self.url,
            version: None,
        };

        if self.inertia {
            let mut response = (status, Json(&object)).into_response();
            let headers = response.headers_mut();
            headers.insert(INERTIA_HEADER, HeaderValue::from_static("true"));
            headers.insert(header::VARY, HeaderValue::from_static("X-Inertia"));
            return response;
        }

        let page_json = serde_json::to_string(&object).unwrap_or_default();
        let document = layout(page.title(), &page_json, &page.render_body());
        (status, Html(document)).into_response()
    }
}

fn layout(title: &str, page_json: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-100">
<div id="app" data-page="{page}">
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
        page = escape(page_json),
        body = body,
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Nguyễn Văn A"), "Nguyễn Văn A");
    }

    #[test]
    fn test_form_titles() {
        assert_eq!(Page::Form(FormProps::create()).title(), "New Reservation");
        assert_eq!(Page::Form(FormProps::create()).component(), "Reservations/Form");
    }
}
