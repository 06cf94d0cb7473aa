pub mod errors;
mod instrumentation;

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock;
pub use instrumentation::ProviderLabelingExt;
use {
    crate::AlloyProvider,
    alloy::{
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    anyhow::Context,
    instrumentation::{InstrumentationLayer, LabelingLayer},
};

/// Creates a read-only provider talking to the node at `url`. Every request
/// is labeled `main` and traced.
pub fn provider(url: &str) -> anyhow::Result<AlloyProvider> {
    let url = url.parse().with_context(|| format!("invalid node url {url:?}"))?;
    let rpc = ClientBuilder::default()
        .layer(LabelingLayer {
            label: "main".into(),
        })
        .layer(InstrumentationLayer)
        .http(url);
    Ok(ProviderBuilder::new().connect_client(rpc).erased())
}

/// A provider answering from a mocked transport. Responses have to be
/// queued on the returned asserter in the order the requests are sent.
#[cfg(any(test, feature = "test-util"))]
pub fn mocked_provider() -> (AlloyProvider, mock::Asserter) {
    let asserter = mock::Asserter::new();
    let provider = ProviderBuilder::new()
        .connect_mocked_client(asserter.clone())
        .erased();
    (provider, asserter)
}

#[cfg(any(test, feature = "test-util"))]
pub fn dummy_provider() -> AlloyProvider {
    mocked_provider().0
}
