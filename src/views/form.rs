//! Shared create/edit form

use super::{FormProps, escape, messages};
use crate::models::reservation::{ReservationStatus, Scalar};
use crate::services::validation::Field;

pub fn render(props: &FormProps) -> String {
    let (title, action, method_field, submit) = match props.reservation {
        Some(ref reservation) => (
            "Edit Reservation",
            format!("/reservations/{}", reservation.id),
            r#"<input type="hidden" name="_method" value="PUT">"#,
            "Update",
        ),
        None => ("New Reservation", "/reservations".to_string(), "", "Create"),
    };

    let values = &props.values;
    let mut fields = String::new();
    fields.push_str(&text_input(
        props,
        Field::CustomerName,
        "Customer Name",
        "text",
        values.customer_name.as_ref(),
        r#"placeholder="Enter customer name" maxlength="100""#,
    ));
    fields.push_str(&text_input(
        props,
        Field::Phone,
        "Phone",
        "text",
        values.phone.as_ref(),
        r#"placeholder="Enter phone number""#,
    ));
    fields.push_str(&text_input(
        props,
        Field::PartySize,
        "Party Size",
        "number",
        values.party_size.as_ref(),
        r#"placeholder="Number of guests" min="1" max="50""#,
    ));
    fields.push_str(&text_input(
        props,
        Field::ReservedAt,
        "Reserved At",
        "datetime-local",
        values.reserved_at.as_ref(),
        "",
    ));
    fields.push_str(&status_select(props));

    format!(
        r#"<div class="min-h-screen py-8"><div class="mx-auto max-w-3xl px-4 sm:px-6 lg:px-8"><div class="rounded-lg bg-white shadow"><div class="border-b border-gray-200 px-6 py-4"><h1 class="text-2xl font-bold text-gray-800">{title}</h1></div><form method="post" action="{action}" class="px-6 py-4">{method_field}<div class="space-y-6">{fields}</div><div class="mt-6 flex justify-end space-x-4 border-t border-gray-200 pt-4"><a href="/reservations" class="rounded-md border border-gray-300 px-4 py-2 font-medium text-gray-700 hover:bg-gray-50">Cancel</a><button type="submit" class="rounded-md bg-blue-600 px-6 py-2 font-medium text-white hover:bg-blue-700">{submit}</button></div></form></div></div></div>"#,
        title = title,
        action = action,
        method_field = method_field,
        fields = fields,
        submit = submit,
    )
}

fn border_class(props: &FormProps, field: Field) -> &'static str {
    if props.errors.contains_key(field.as_str()) {
        "border-red-500"
    } else {
        "border-gray-300"
    }
}

fn error_text(props: &FormProps, field: Field) -> String {
    props
        .errors
        .get(field.as_str())
        .map(|message| {
            format!(
                r#"<p class="mt-1 text-sm text-red-600" data-error-for="{}">{}</p>"#,
                field.as_str(),
                escape(message)
            )
        })
        .unwrap_or_default()
}

fn text_input(
    props: &FormProps,
    field: Field,
    label: &str,
    input_type: &str,
    value: Option<&Scalar>,
    extra: &str,
) -> String {
    let name = field.as_str();
    format!(
        r#"<div><label for="{name}" class="mb-2 block text-sm font-medium text-gray-700">{label} <span class="text-red-500">*</span></label><input type="{input_type}" id="{name}" name="{name}" value="{value}" {extra} class="w-full rounded-md border px-4 py-2 {border}">{error}</div>"#,
        name = name,
        label = label,
        input_type = input_type,
        value = escape(&value.map(Scalar::display).unwrap_or_default()),
        extra = extra,
        border = border_class(props, field),
        error = error_text(props, field),
    )
}

fn status_select(props: &FormProps) -> String {
    let selected = props.values.status.as_ref().and_then(Scalar::as_text).unwrap_or("");
    let options: String = ReservationStatus::ALL
        .iter()
        .map(|status| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                status,
                if selected == status.as_str() { " selected" } else { "" },
                messages::status_label(*status)
            )
        })
        .collect();

    format!(
        r#"<div><label for="status" class="mb-2 block text-sm font-medium text-gray-700">Status <span class="text-red-500">*</span></label><select id="status" name="status" class="w-full rounded-md border px-4 py-2 {border}">{options}</select>{error}</div>"#,
        border = border_class(props, Field::Status),
        options = options,
        error = error_text(props, Field::Status),
    )
}
