use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

use crate::config::GatewayConfig;
use crate::metrics::Metrics;

use super::errors::*;
use super::models::*;
use super::ProductionGateway;

// ============================================================================
// HTTP Gateway
// ============================================================================
//
// One reqwest client for both sibling services. Every call is attempted
// exactly once and its failure is reported as one of the three
// GatewayError kinds.
//
// Ids are always appended as single, percent-encoded path segments, so
// whatever a caller passes can only ever address the intended route.
//
// ============================================================================

pub struct HttpGateway {
    client: Client,
    order_service_url: Url,
    payment_service_url: Url,
    metrics: Arc<Metrics>,
}

fn base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))?;
    anyhow::ensure!(!url.cannot_be_a_base(), "{} cannot be used as a base URL", raw);
    Ok(url)
}

/// `base` extended by `segments`. `None` when a segment is empty, `.` or
/// `..`, since those would collapse onto a different route.
fn endpoint(base: &Url, segments: &[&str]) -> Option<Url> {
    if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
        return None;
    }

    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
    Some(url)
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig, metrics: Arc<Metrics>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            order_service_url: base_url(&config.order_service_url)?,
            payment_service_url: base_url(&config.payment_service_url)?,
            metrics,
        })
    }

    fn observe<T>(&self, operation: &str, started: Instant, result: &Result<T, GatewayError>) {
        let outcome = match result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        self.metrics
            .record_gateway_call(operation, outcome, started.elapsed().as_secs_f64());
    }

    /// GET a snapshot wrapped as `{"<resource>": {...}}` by the order service.
    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        resource: RemoteResource,
        segments: &[&str],
    ) -> Result<T, GatewayError> {
        let started = Instant::now();
        let result = match endpoint(&self.order_service_url, segments) {
            Some(url) => self.fetch_inner(resource, url).await,
            None => Err(resource.not_found()),
        };
        self.observe(operation, started, &result);

        if let Err(e) = &result {
            tracing::warn!(operation, path = ?segments, kind = e.kind(), error = %e, "Remote fetch failed");
        }
        result
    }

    async fn fetch_inner<T: DeserializeOwned>(
        &self,
        resource: RemoteResource,
        url: Url,
    ) -> Result<T, GatewayError> {
        let unreachable = || GatewayError::Communication(ORDER_SERVICE_UNREACHABLE.to_string());

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::debug!(error = %e, "Transport error");
            unreachable()
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(resource.not_found());
        }
        if !status.is_success() {
            return Err(resource.fetch_failed());
        }

        let mut body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "Unreadable response body");
            unreachable()
        })?;

        let snapshot = body
            .get_mut(resource.field())
            .map(serde_json::Value::take)
            .ok_or_else(unreachable)?;

        serde_json::from_value(snapshot).map_err(|e| {
            tracing::debug!(error = %e, field = resource.field(), "Snapshot did not match expected shape");
            unreachable()
        })
    }

    /// Send a write whose only interesting outcome is success or not.
    async fn write<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        method: Method,
        url: Option<Url>,
        body: &B,
        failed: &str,
        unreachable: &str,
    ) -> Result<(), GatewayError> {
        let started = Instant::now();

        let result = match url {
            None => {
                tracing::warn!(operation, "Id is not a usable path segment");
                Err(GatewayError::Upstream(failed.to_string()))
            }
            Some(url) => match self.client.request(method, url).json(body).send().await {
                Ok(response) if response.status().is_success() => Ok(()),
                Ok(response) => {
                    tracing::warn!(operation, status = %response.status(), "Remote write rejected");
                    Err(GatewayError::Upstream(failed.to_string()))
                }
                Err(e) => {
                    tracing::warn!(operation, error = %e, "Remote write did not complete");
                    Err(GatewayError::Communication(unreachable.to_string()))
                }
            },
        };

        self.observe(operation, started, &result);
        result
    }
}

#[async_trait]
impl ProductionGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn get_order_by_id(&self, order_id: &str) -> Result<RemoteOrder, GatewayError> {
        self.fetch("get_order_by_id", RemoteResource::Order, &["order", order_id])
            .await
    }

    #[instrument(skip(self))]
    async fn get_customer_by_cpf(&self, cpf: &str) -> Result<Customer, GatewayError> {
        self.fetch("get_customer_by_cpf", RemoteResource::Customer, &["customers", cpf])
            .await
    }

    #[instrument(skip(self))]
    async fn get_product_by_id(&self, product_id: &str) -> Result<Product, GatewayError> {
        self.fetch("get_product_by_id", RemoteResource::Product, &["products", product_id])
            .await
    }

    #[instrument(skip(self))]
    async fn update_order_status(&self, order_id: &str, status: &str) -> Result<(), GatewayError> {
        self.write(
            "update_order_status",
            Method::PATCH,
            endpoint(&self.order_service_url, &["orders", order_id, "status"]),
            &StatusUpdateRequest { status },
            ORDER_STATUS_UPDATE_FAILED,
            ORDER_SERVICE_UNREACHABLE,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn notify_payment_service(&self, order_id: &str, status: &str) -> Result<(), GatewayError> {
        self.write(
            "notify_payment_service",
            Method::POST,
            endpoint(&self.payment_service_url, &["orders", order_id, "production-status"]),
            &ProductionStatusNotification { order_id, status },
            PAYMENT_NOTIFICATION_FAILED,
            PAYMENT_SERVICE_UNREACHABLE,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock_server::{unreachable_url, MockService};
    use serde_json::json;

    fn gateway_for(order_url: &str, payment_url: &str) -> (HttpGateway, Arc<Metrics>) {
        let metrics = Arc::new(Metrics::new().unwrap());
        let gateway = HttpGateway::new(&GatewayConfig::with_urls(order_url, payment_url), metrics.clone()).unwrap();
        (gateway, metrics)
    }

    #[actix_web::test]
    async fn test_get_order_by_id_unwraps_snapshot() {
        let mock = MockService::start();
        mock.respond(
            "GET",
            "/order/order-1",
            200,
            json!({"order": {"id": "order-1", "customerId": "customer-1", "status": "Recebido"}}),
        );
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let order = gateway.get_order_by_id("order-1").await.unwrap();

        assert_eq!(order.id, "order-1");
        assert_eq!(order.customer_id, "customer-1");
        assert_eq!(order.status.as_deref(), Some("Recebido"));
    }

    #[actix_web::test]
    async fn test_get_order_by_id_not_found() {
        let mock = MockService::start();
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let err = gateway.get_order_by_id("missing").await.unwrap_err();

        assert_eq!(err, GatewayError::NotFound("Pedido não encontrado".to_string()));
    }

    #[actix_web::test]
    async fn test_get_order_by_id_upstream_failure() {
        let mock = MockService::start();
        mock.respond("GET", "/order/order-1", 500, json!({"message": "boom"}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let err = gateway.get_order_by_id("order-1").await.unwrap_err();

        assert_eq!(err, GatewayError::Upstream("Erro ao buscar pedido".to_string()));
    }

    #[actix_web::test]
    async fn test_get_order_by_id_unreachable() {
        let url = unreachable_url();
        let (gateway, metrics) = gateway_for(&url, &url);

        let err = gateway.get_order_by_id("order-1").await.unwrap_err();

        assert_eq!(
            err,
            GatewayError::Communication("Erro de comunicação com microserviço de pedidos".to_string())
        );
        let text = String::from_utf8(metrics.render().unwrap()).unwrap();
        assert!(text.contains("communication_error"));
    }

    #[actix_web::test]
    async fn test_get_customer_by_cpf_variants() {
        let mock = MockService::start();
        mock.respond(
            "GET",
            "/customers/12345678900",
            200,
            json!({"customer": {"id": "c1", "name": "Ana", "email": "ana@example.com", "cpf": "12345678900"}}),
        );
        mock.respond("GET", "/customers/broken", 503, json!({}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let customer = gateway.get_customer_by_cpf("12345678900").await.unwrap();
        assert_eq!(customer.name, "Ana");

        let err = gateway.get_customer_by_cpf("unknown").await.unwrap_err();
        assert_eq!(err.to_string(), "Cliente não encontrado");

        let err = gateway.get_customer_by_cpf("broken").await.unwrap_err();
        assert_eq!(err, GatewayError::Upstream("Erro ao buscar cliente".to_string()));
    }

    #[actix_web::test]
    async fn test_get_product_by_id_variants() {
        let mock = MockService::start();
        mock.respond(
            "GET",
            "/products/p1",
            200,
            json!({"product": {"id": "p1", "name": "Coca", "description": "Lata", "price": 6.5, "category": "Bebidas"}}),
        );
        mock.respond("GET", "/products/p2", 500, json!({}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let product = gateway.get_product_by_id("p1").await.unwrap();
        assert_eq!(product.category, "Bebidas");
        assert_eq!(product.price, 6.5);

        assert_eq!(
            gateway.get_product_by_id("p9").await.unwrap_err(),
            GatewayError::NotFound("Produto não encontrado".to_string())
        );
        assert_eq!(
            gateway.get_product_by_id("p2").await.unwrap_err(),
            GatewayError::Upstream("Erro ao buscar produto".to_string())
        );
    }

    #[actix_web::test]
    async fn test_malformed_body_is_communication_error() {
        let mock = MockService::start();
        mock.respond("GET", "/products/p1", 200, json!({"unexpected": true}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let err = gateway.get_product_by_id("p1").await.unwrap_err();

        assert!(matches!(err, GatewayError::Communication(_)));
    }

    #[actix_web::test]
    async fn test_update_order_status_sends_patch() {
        let mock = MockService::start();
        mock.respond("PATCH", "/orders/order-1/status", 200, json!({}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        gateway.update_order_status("order-1", "ready").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "PATCH");
        assert_eq!(calls[0].path, "/orders/order-1/status");
        assert_eq!(calls[0].body, Some(json!({"status": "ready"})));
    }

    #[actix_web::test]
    async fn test_update_order_status_failure_kinds() {
        let mock = MockService::start();
        mock.respond("PATCH", "/orders/order-1/status", 422, json!({}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let err = gateway.update_order_status("order-1", "ready").await.unwrap_err();
        assert_eq!(err, GatewayError::Upstream("Erro ao atualizar status do pedido".to_string()));

        let url = unreachable_url();
        let (gateway, _) = gateway_for(&url, &url);
        let err = gateway.update_order_status("order-1", "ready").await.unwrap_err();
        assert_eq!(err.to_string(), "Erro de comunicação com microserviço de pedidos");
    }

    #[actix_web::test]
    async fn test_notify_payment_service_uses_payment_url() {
        let orders = MockService::start();
        let payments = MockService::start();
        payments.respond("POST", "/orders/order-1/production-status", 201, json!({}));
        let (gateway, _) = gateway_for(&orders.url(), &payments.url());

        gateway.notify_payment_service("order-1", "preparing").await.unwrap();

        assert!(orders.calls().is_empty());
        let calls = payments.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].body, Some(json!({"orderId": "order-1", "status": "preparing"})));
    }

    #[actix_web::test]
    async fn test_notify_payment_service_failure_kinds() {
        let orders = MockService::start();
        let payments = MockService::start();
        let (gateway, _) = gateway_for(&orders.url(), &payments.url());

        let err = gateway.notify_payment_service("order-1", "ready").await.unwrap_err();
        assert_eq!(err, GatewayError::Upstream("Erro ao notificar microserviço de pagamento".to_string()));

        let (gateway, _) = gateway_for(&orders.url(), &unreachable_url());
        let err = gateway.notify_payment_service("order-1", "ready").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Communication("Erro de comunicação com microserviço de pagamento".to_string())
        );
    }

    #[test]
    fn test_endpoint_encodes_each_id_as_one_segment() {
        let base = base_url("http://localhost:3333/api/").unwrap();

        let url = endpoint(&base, &["orders", "a/b?c#d", "status"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/orders/a%2Fb%3Fc%23d/status");

        assert!(endpoint(&base, &["products", ".."]).is_none());
        assert!(endpoint(&base, &["products", ""]).is_none());
    }

    #[actix_web::test]
    async fn test_update_order_status_keeps_id_in_its_segment() {
        let mock = MockService::start();
        mock.respond("PATCH", "/orders/other%3Fx/status", 200, json!({}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        gateway.update_order_status("other?x", "ready").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/orders/other%3Fx/status");
    }

    #[actix_web::test]
    async fn test_product_id_cannot_reach_another_route() {
        let mock = MockService::start();
        mock.respond(
            "GET",
            "/order/abc",
            200,
            json!({"order": {"id": "abc", "customerId": "customer-1"}}),
        );
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let err = gateway.get_product_by_id("../order/abc").await.unwrap_err();
        assert_eq!(err, GatewayError::NotFound("Produto não encontrado".to_string()));
        assert_eq!(mock.calls()[0].path, "/products/..%2Forder%2Fabc");

        let err = gateway.get_product_by_id("..").await.unwrap_err();
        assert_eq!(err, GatewayError::NotFound("Produto não encontrado".to_string()));
        assert_eq!(mock.calls().len(), 1);
    }

    #[actix_web::test]
    async fn test_unusable_id_is_never_written() {
        let mock = MockService::start();
        mock.respond("PATCH", "/orders/status", 200, json!({}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let err = gateway.update_order_status("..", "ready").await.unwrap_err();

        assert_eq!(err, GatewayError::Upstream("Erro ao atualizar status do pedido".to_string()));
        assert!(mock.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_each_call_is_attempted_once() {
        let mock = MockService::start();
        mock.respond("PATCH", "/orders/order-1/status", 500, json!({}));
        let (gateway, _) = gateway_for(&mock.url(), &mock.url());

        let _ = gateway.update_order_status("order-1", "ready").await;
        let _ = gateway.get_order_by_id("order-1").await;

        assert_eq!(mock.calls().len(), 2);
    }
}
