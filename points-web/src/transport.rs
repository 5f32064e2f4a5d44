use gloo::net::http::Request;
use points_core::{PointsEditRequest, PointsTransport, TransportError};
use std::future::Future;

/// Browser `fetch` transport for the points endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl PointsTransport for FetchTransport {
    fn post_points(
        &self,
        url: &str,
        body: &PointsEditRequest,
    ) -> impl Future<Output = Result<u16, TransportError>> {
        // `json` sets `Content-Type: application/json`.
        let request = Request::post(url).json(body);
        async move {
            let request = request.map_err(|err| TransportError::Encode(err.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|err| TransportError::Network(err.to_string()))?;
            Ok(response.status())
        }
    }
}
