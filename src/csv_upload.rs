//! The CSV upload form and the endpoint that forwards the file to the API for
//! import and auto-categorization.

use axum::{
    extract::{Multipart, State, multipart::Field},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    api::CsvFile,
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, CsvUploaded, UploadCsv},
    dashboard::dashboard_data_oob_view,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE},
    log_out::session_ended_response,
    view::{UPLOAD_CSV, ViewController},
};

/// The name of the form field holding the file.
const FILE_FIELD: &str = "file";

/// The message shown below the upload button.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Idle,
    /// The number of transactions the API imported.
    Success(u64),
    /// A request for input, such as choosing a file first.
    Prompt(String),
    Error(String),
}

/// Render the upload form with its button ready for input.
///
/// While the request is in flight the browser disables the button, shows its
/// busy label and replaces the status with "Processing...". The response
/// always replaces the whole form, so the button comes back enabled with its
/// original label whatever the outcome.
pub fn upload_form(status: &UploadStatus) -> Markup {
    html! {
        form
            id="upload-form"
            hx-post=(endpoints::UPLOAD_CSV_API)
            hx-encoding="multipart/form-data"
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="this"
            hx-disabled-elt="find button"
            class="space-y-4"
        {
            div
            {
                label for="csv-file" class="sr-only" { "CSV file" }

                input
                    type="file"
                    name=(FILE_FIELD)
                    id="csv-file"
                    accept=".csv,text/csv"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (UPLOAD_CSV.idle().submit_button(BUTTON_PRIMARY_STYLE))

            p id="upload-status" class="text-sm"
            {
                span class="control-busy-label text-gray-600 dark:text-gray-300" { "Processing..." }

                @match status
                {
                    UploadStatus::Idle => {}
                    UploadStatus::Success(count) => {
                        span class="control-label text-green-600 dark:text-green-400"
                        {
                            "Success! " (count) " transactions uploaded."
                        }
                    }
                    UploadStatus::Prompt(message) => {
                        span class="control-label text-red-500" { (message) }
                    }
                    UploadStatus::Error(message) => {
                        span class="control-label text-red-500" { "Error: " (message) }
                    }
                }
            }
        }
    }
}

/// Route handler for uploading a CSV file.
///
/// On success the number of imported transactions is shown and the list and
/// chart are swapped in out-of-band, even if fetching them failed.
pub async fn upload_csv_endpoint(
    State(state): State<ApiState>,
    mut store: TokenStore,
    multipart: Multipart,
) -> Response {
    let file = match read_csv_file(multipart).await {
        Ok(file) => file,
        Err(error) => return upload_error_response(error),
    };

    let mut view = ViewController::from_session(store.session());
    let result = CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
        .dispatch(UploadCsv { file })
        .await;

    match result {
        Err(error) if error.ends_session() => session_ended_response(store),
        Ok(CsvUploaded {
            refreshed: Err(error),
            ..
        }) if error.ends_session() => session_ended_response(store),
        Ok(CsvUploaded {
            uploaded,
            refreshed,
        }) => html! {
            (upload_form(&UploadStatus::Success(uploaded)))
            (dashboard_data_oob_view(&refreshed))
        }
        .into_response(),
        Err(error) => upload_error_response(error),
    }
}

fn upload_error_response(error: Error) -> Response {
    let status = match error {
        Error::NoFileSelected => UploadStatus::Prompt(error.alert_details()),
        _ => UploadStatus::Error(error.alert_details()),
    };

    (error.alert_status(), upload_form(&status)).into_response()
}

/// Read the uploaded file from the form.
///
/// Returns `Ok(None)` if the form was submitted without choosing a file,
/// which browsers send as a file field with an empty file name.
///
/// # Errors
///
/// Returns [Error::NotCSV] if the file is neither named `.csv` nor sent as
/// `text/csv`, or [Error::MultipartError] if the form could not be read.
async fn read_csv_file(mut multipart: Multipart) -> Result<Option<CsvFile>, Error> {
    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.body_text())
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        return parse_file_field(field).await;
    }

    Ok(None)
}

async fn parse_file_field(field: Field<'_>) -> Result<Option<CsvFile>, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();

    if file_name.is_empty() {
        return Ok(None);
    }

    if !is_csv(field.content_type(), &file_name) {
        return Err(Error::NotCSV);
    }

    let bytes = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, bytes.len());

    Ok(Some(CsvFile {
        file_name,
        bytes: bytes.to_vec(),
    }))
}

fn is_csv(content_type: Option<&str>, file_name: &str) -> bool {
    content_type == Some("text/csv") || file_name.to_lowercase().ends_with(".csv")
}
