// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bytes::Bytes;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::cancel::CancelToken;
use crate::config::ApiConfig;
use crate::error::{CatalogError, FetchError};
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

use super::model::{ShowDetail, ShowPreview};

/// GET a URL and return the body of a 2xx response
async fn fetch_body<C: HttpClient>(
    client: &C,
    url: &Url,
    token: CancelToken,
) -> Result<Bytes, FetchError> {
    let url = url.as_str();
    debug!(url, "requesting");

    let response = token
        .run(client.get(url))
        .await
        .map_err(|_| FetchError::Cancelled {
            url: url.to_string(),
        })?
        .map_err(|e| FetchError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    debug!(url, status = response.status, bytes = response.body.len(), "response received");

    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response.body)
}

fn report_failure(reporter: &SharedProgressReporter, url: &Url, error: &FetchError) {
    let url = url.to_string();
    if error.is_cancelled() {
        reporter.report(ProgressEvent::FetchCancelled { url });
    } else {
        reporter.report(ProgressEvent::FetchFailed {
            url,
            error: error.to_string(),
        });
    }
}

/// Fetch every show preview in catalogue order
pub async fn fetch_all_previews<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
    token: CancelToken,
    reporter: &SharedProgressReporter,
) -> Result<Vec<ShowPreview>, FetchError> {
    let url = config.previews_url();
    reporter.report(ProgressEvent::FetchingPreviews {
        url: url.to_string(),
    });

    let result = fetch_body(client, &url, token).await.and_then(|body| {
        serde_json::from_slice::<Vec<ShowPreview>>(&body).map_err(|e| {
            FetchError::InvalidResponse {
                url: url.to_string(),
                source: e,
            }
        })
    });

    match &result {
        Ok(previews) => reporter.report(ProgressEvent::PreviewsLoaded {
            count: previews.len(),
        }),
        Err(e) => report_failure(reporter, &url, e),
    }

    result
}

/// Fetch the full record of a single show.
///
/// A successful response without a usable payload (empty body, `null`, `{}`)
/// is reported as [`CatalogError::NotFound`].
pub async fn fetch_show_detail<C: HttpClient>(
    client: &C,
    config: &ApiConfig,
    id: &str,
    token: CancelToken,
    reporter: &SharedProgressReporter,
) -> Result<ShowDetail, CatalogError> {
    let url = config.show_url(id)?;
    reporter.report(ProgressEvent::FetchingShow {
        id: id.to_string(),
        url: url.to_string(),
    });

    let body = match fetch_body(client, &url, token).await {
        Ok(body) => body,
        Err(e) => {
            report_failure(reporter, &url, &e);
            return Err(e.into());
        }
    };

    let detail = decode_detail(&body, &url, id).inspect_err(|e| {
        if let CatalogError::Fetch(e) = e {
            report_failure(reporter, &url, e);
        }
    })?;

    reporter.report(ProgressEvent::ShowLoaded {
        id: detail.id.clone(),
        title: detail.title.clone(),
        season_count: detail.season_count(),
    });

    Ok(detail)
}

fn decode_detail(body: &[u8], url: &Url, id: &str) -> Result<ShowDetail, CatalogError> {
    let not_found = || CatalogError::NotFound { id: id.to_string() };
    let invalid = |e| FetchError::InvalidResponse {
        url: url.to_string(),
        source: e,
    };

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(not_found());
    }

    let value: Value = serde_json::from_slice(body).map_err(invalid)?;
    match &value {
        Value::Null => return Err(not_found()),
        Value::Object(fields) if fields.is_empty() => return Err(not_found()),
        _ => {}
    }

    Ok(serde_json::from_value(value).map_err(invalid)?)
}
