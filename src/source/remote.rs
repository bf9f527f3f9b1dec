//! Remote-JSON source: an HTTP endpoint returning a JSON array of objects.

use log::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::types::Records;

use super::json::load_json_from_str;

/// Fetch `url` with a blocking GET and parse the body like a JSON file.
///
/// Any status other than `200 OK` is reported as [`PipelineError::RemoteStatus`]; connection
/// and transport failures as [`PipelineError::SourceUnavailable`].
pub fn load_remote_json(url: &str) -> PipelineResult<Records> {
    debug!("GET {url}");
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(status)) => {
            return Err(PipelineError::RemoteStatus {
                url: url.to_string(),
                status,
            });
        }
        Err(err) => {
            return Err(PipelineError::SourceUnavailable {
                locator: url.to_string(),
                reason: format!("request failed: {err}"),
            });
        }
    };

    let status = response.status().as_u16();
    if status != 200 {
        return Err(PipelineError::RemoteStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = response.into_body().read_to_string().map_err(|err| {
        PipelineError::SourceUnavailable {
            locator: url.to_string(),
            reason: format!("failed reading response body: {err}"),
        }
    })?;

    load_json_from_str(&body)
}
