//! Reservation list page: filters, table, pagination

use super::{IndexProps, escape, messages};
use crate::models::reservation::{ReservationResource, ReservationStatus};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this reservation?";
pub const EMPTY_TABLE: &str = "No reservations found";

pub fn render(props: &IndexProps) -> String {
    let mut html = String::new();

    html.push_str(
        r#"<div class="min-h-screen py-8"><div class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8"><div class="rounded-lg bg-white shadow">"#,
    );
    html.push_str(
        r#"<div class="flex items-center justify-between border-b border-gray-200 px-6 py-4"><h1 class="text-2xl font-bold text-gray-800">Restaurant Reservations</h1><a href="/reservations/create" class="rounded-md bg-blue-600 px-4 py-2 font-medium text-white hover:bg-blue-700">+ New Reservation</a></div>"#,
    );

    if let Some(ref message) = props.flash.success {
        html.push_str(&format!(
            r#"<div class="border-b border-green-200 bg-green-50 px-6 py-3 text-green-800" role="status">{}</div>"#,
            escape(message)
        ));
    }

    html.push_str(&render_filters(props));
    html.push_str(&render_table(&props.reservations.data));

    if props.reservations.last_page > 1 {
        html.push_str(&render_pagination(props));
    }

    html.push_str("</div></div></div>");
    html
}

fn render_filters(props: &IndexProps) -> String {
    let search = props.filters.search.as_deref().unwrap_or("");
    let selected = props.filters.status.as_deref().unwrap_or("");

    let mut options = format!(
        r#"<option value=""{}>All statuses</option>"#,
        if selected.is_empty() { " selected" } else { "" }
    );
    for status in ReservationStatus::ALL {
        options.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            status,
            if selected == status.as_str() { " selected" } else { "" },
            messages::status_label(status)
        ));
    }

    format!(
        r#"<div class="border-b border-gray-200 px-6 py-4"><form method="get" action="/reservations" class="flex gap-4"><input type="text" name="search" value="{search}" placeholder="Search by name or phone..." class="flex-1 rounded-md border border-gray-300 px-4 py-2"><select name="status" class="rounded-md border border-gray-300 px-4 py-2">{options}</select><button type="submit" class="rounded-md bg-gray-600 px-6 py-2 font-medium text-white hover:bg-gray-700">Search</button></form></div>"#,
        search = escape(search),
        options = options,
    )
}

fn render_table(reservations: &[ReservationResource]) -> String {
    let mut html = String::from(
        r#"<div class="overflow-x-auto"><table class="min-w-full divide-y divide-gray-200"><thead class="bg-gray-50"><tr>"#,
    );
    for heading in [
        "ID",
        "Customer Name",
        "Phone",
        "Party Size",
        "Reserved At",
        "Status",
        "Actions",
    ] {
        html.push_str(&format!(
            r#"<th class="px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-gray-500">{}</th>"#,
            heading
        ));
    }
    html.push_str(r#"</tr></thead><tbody class="divide-y divide-gray-200 bg-white">"#);

    if reservations.is_empty() {
        html.push_str(&format!(
            r#"<tr><td colspan="7" class="px-6 py-4 text-center text-gray-500">{}</td></tr>"#,
            EMPTY_TABLE
        ));
    }

    for reservation in reservations {
        html.push_str(&render_row(reservation));
    }

    html.push_str("</tbody></table></div>");
    html
}

fn render_row(reservation: &ReservationResource) -> String {
    let cell = |text: &str| {
        format!(
            r#"<td class="whitespace-nowrap px-6 py-4 text-sm text-gray-900">{}</td>"#,
            escape(text)
        )
    };

    format!(
        r#"<tr data-id="{id}">{id_cell}{name}{phone}{size}{reserved_at}<td class="whitespace-nowrap px-6 py-4">{badge}</td><td class="space-x-2 whitespace-nowrap px-6 py-4 text-sm font-medium"><a href="/reservations/{id}/edit" class="text-blue-600 hover:text-blue-900">Edit</a><form method="post" action="/reservations/{id}" class="inline" onsubmit="return confirm('{confirm}');"><input type="hidden" name="_method" value="DELETE"><button type="submit" class="text-red-600 hover:text-red-900">Delete</button></form></td></tr>"#,
        id = reservation.id,
        id_cell = cell(&reservation.id.to_string()),
        name = cell(&reservation.customer_name),
        phone = cell(&reservation.phone),
        size = cell(&reservation.party_size.to_string()),
        reserved_at = cell(&reservation.reserved_at.format("%Y-%m-%d %H:%M").to_string()),
        badge = status_badge(&reservation.status),
        confirm = DELETE_CONFIRMATION,
    )
}

/// Colored status badge; an unrecognised stored value is shown as-is
pub fn status_badge(status: &str) -> String {
    let (class, label) = match status.parse::<ReservationStatus>() {
        Ok(status) => (
            messages::status_badge_class(status),
            messages::status_label(status).to_string(),
        ),
        Err(_) => ("bg-gray-100 text-gray-800", escape(status)),
    };
    format!(
        r#"<span class="inline-flex rounded-full px-2 py-1 text-xs font-semibold leading-5 {}" data-status="{}">{}</span>"#,
        class,
        escape(status),
        label
    )
}

fn render_pagination(props: &IndexProps) -> String {
    let mut html = String::from(
        r#"<div class="border-t border-gray-200 px-6 py-4"><nav class="flex justify-center space-x-2">"#,
    );

    for link in &props.reservations.links {
        let label = escape(&link.label);
        match (&link.url, link.active) {
            (Some(url), true) => html.push_str(&format!(
                r#"<a href="{}" class="rounded bg-blue-600 px-3 py-1 text-white" aria-current="page">{}</a>"#,
                escape(url),
                label
            )),
            (Some(url), false) => html.push_str(&format!(
                r#"<a href="{}" class="rounded bg-white px-3 py-1 text-gray-700 hover:bg-gray-100">{}</a>"#,
                escape(url),
                label
            )),
            (None, _) => html.push_str(&format!(
                r#"<span class="cursor-not-allowed rounded bg-gray-100 px-3 py-1 text-gray-400">{}</span>"#,
                label
            )),
        }
    }

    html.push_str("</nav></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ReservationFilter;
    use crate::services::pagination::paginate;
    use crate::views::Flash;
    use chrono::{TimeZone, Utc};

    fn reservation(id: i32, name: &str, status: &str) -> ReservationResource {
        let at = Utc.with_ymd_and_hms(2026, 10, 20, 19, 30, 0).unwrap();
        ReservationResource {
            id,
            customer_name: name.to_string(),
            phone: "+84912345678".to_string(),
            party_size: 4,
            reserved_at: at,
            status: status.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    fn props(data: Vec<ReservationResource>, total: u64) -> IndexProps {
        IndexProps {
            reservations: paginate(data, total, 1, 10, |p| format!("/reservations?page={}", p)),
            filters: ReservationFilter::default(),
            flash: Flash::default(),
        }
    }

    #[test]
    fn test_renders_rows_with_escaped_names_and_badges() {
        let html = render(&props(vec![reservation(1, "<script>x</script>", "seated")], 1));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains(r#"data-status="seated""#));
        assert!(html.contains("bg-blue-100 text-blue-800"));
        assert!(html.contains("2026-10-20 19:30"));
        assert!(html.contains(DELETE_CONFIRMATION));
    }

    #[test]
    fn test_empty_table_message_and_no_pagination() {
        let html = render(&props(vec![], 0));
        assert!(html.contains(EMPTY_TABLE));
        assert!(!html.contains("<nav"));
    }

    #[test]
    fn test_pagination_shown_for_multiple_pages() {
        let html = render(&props(vec![reservation(1, "A", "pending")], 25));
        assert!(html.contains("<nav"));
        assert!(html.contains(r#"href="/reservations?page=3""#));
    }

    #[test]
    fn test_filters_echoed() {
        let mut p = props(vec![], 0);
        p.filters = ReservationFilter {
            search: Some("Nguyen \"B\"".to_string()),
            status: Some("confirmed".to_string()),
        };
        let html = render(&p);
        assert!(html.contains(r#"value="Nguyen &quot;B&quot;""#));
        assert!(html.contains(r#"<option value="confirmed" selected>"#));
    }
}
