//! This module implements 2 alloy transport layers to help
//! with instrumenting RPC calls. The [`LabelingLayer`] will "tag"
//! RPC calls that come through by adding the label to the call's
//! metadata. These layers can be stacked to tell apart the components
//! issuing requests.
//! The [`InstrumentationLayer`] reads that label metadata for each
//! call and emits logs with that label.
//! The module also exports the [`ProviderLabelingExt`] extension
//! trait to conveniently create a new `Provider` with an additional
//! [`LabelingLayer`].
use {
    crate::AlloyProvider,
    alloy::{
        providers::{Provider, ProviderBuilder},
        rpc::{
            client::RpcClient,
            json_rpc::{RequestPacket, ResponsePacket, SerializedRequest},
        },
        transports::TransportError,
    },
    std::{
        fmt::Debug,
        pin::Pin,
        task::{Context, Poll},
        time::Instant,
    },
    tower::{Layer, Service},
};

/// Layer that attaches a label to each request that passes through.
pub(crate) struct LabelingLayer {
    pub label: String,
}

impl<S> Layer<S> for LabelingLayer {
    type Service = LabeledProvider<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LabeledProvider {
            inner,
            // Append underscore for more readable labels
            // when multiple layers are nested in one another.
            // The last underscore will be dropped before
            // logging the final composed label.
            label: format!("{}_", self.label),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LabeledProvider<S> {
    inner: S,
    label: String,
}

impl<S> LabeledProvider<S> {
    fn attach_label(&self, req: &mut SerializedRequest) {
        req.meta_mut()
            .extensions_mut()
            .get_or_insert_default::<ProviderLabel>()
            .append(&self.label);
    }
}

impl<S> Service<RequestPacket> for LabeledProvider<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static + Debug,
    S::Error: Send + 'static + Debug,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: RequestPacket) -> Self::Future {
        req.requests_mut()
            .iter_mut()
            .for_each(|r| self.attach_label(r));
        Box::pin(self.inner.call(req))
    }
}

/// Layer that logs every request together with the [`ProviderLabel`]
/// metadata attached to it.
pub(crate) struct InstrumentationLayer;

impl<S> Layer<S> for InstrumentationLayer {
    type Service = InstrumentedProvider<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentedProvider { inner }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct InstrumentedProvider<S> {
    inner: S,
}

impl<S> Service<RequestPacket> for InstrumentedProvider<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static + Debug,
    S::Error: Send + 'static + Debug,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: RequestPacket) -> Self::Future {
        let requests: Vec<(String, String)> = req
            .requests_mut()
            .iter_mut()
            .map(|r| {
                let component: String = r
                    .meta_mut()
                    .extensions_mut()
                    .remove::<ProviderLabel>()
                    .map(Into::into)
                    .unwrap_or_default();
                tracing::trace!(component, ?r, "executing request");
                (component, r.method().to_string())
            })
            .collect();

        if requests.len() > 1 {
            tracing::trace!(len = requests.len(), "executing batch request");
        }

        let start = Instant::now();
        let fut = self.inner.call(req);
        Box::pin(async move {
            let res = fut.await;
            let elapsed = start.elapsed();
            for (component, method) in requests {
                match &res {
                    Ok(_) => tracing::debug!(component, method, ?elapsed, "request completed"),
                    Err(err) => {
                        tracing::debug!(component, method, ?elapsed, ?err, "request failed")
                    }
                }
            }
            res
        })
    }
}

pub trait ProviderLabelingExt {
    /// Creates a new provider tagged with another label.
    fn labeled<S: ToString>(&self, label: S) -> Self;
}

impl ProviderLabelingExt for AlloyProvider {
    fn labeled<S: ToString>(&self, label: S) -> Self {
        let is_local = self.client().is_local();
        let transport = self.client().transport().clone();
        let transport_with_label = LabelingLayer {
            label: label.to_string(),
        }
        .layer(transport);
        let client = RpcClient::new(transport_with_label, is_local);
        ProviderBuilder::new().connect_client(client).erased()
    }
}

/// Label that identifies which component emitted a request.
/// Each [`LabelingLayer`] a request passes through appends its
/// own label to it so we know the entire hierarchy of components
/// a request went through.
#[derive(Debug, Clone)]
struct ProviderLabel(String);

impl Default for ProviderLabel {
    fn default() -> Self {
        // overallocate to avoid reallocations when other layers add more labels
        Self(String::with_capacity(30))
    }
}

impl ProviderLabel {
    fn append(&mut self, label: &str) {
        self.0.insert_str(0, label)
    }
}

impl From<ProviderLabel> for String {
    fn from(mut value: ProviderLabel) -> Self {
        // The labeling layer always appends an underscore
        // to the label. To have a clean identifier we pop
        // of the last one.
        value.0.pop();
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_labels_are_prepended() {
        let mut label = ProviderLabel::default();
        label.append("main_");
        label.append("tokens_");
        assert_eq!(String::from(label), "tokens_main");
    }
}
