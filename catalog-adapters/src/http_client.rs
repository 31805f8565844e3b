use std::sync::Arc;

use hyper::client::HttpConnector;
use hyper::{Body, Client};
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use webpki_roots::TLS_SERVER_ROOTS;

pub(crate) type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Builds a pooled client trusting the bundled web PKI roots.
///
/// Plain `http://` stays allowed so a local gateway can stand in for the API.
pub(crate) fn build_https_client() -> HttpsClient {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let tls = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    Client::builder().build::<_, Body>(HttpsConnector::from((http, Arc::new(tls))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_pooled_client() {
        let client = build_https_client();
        let _shared = client.clone();
    }
}
