//! Dynamic routing configuration for the reverse proxy in front of the
//! microservices. One router per resource, one load-balanced service per
//! microservice.

use std::collections::BTreeMap;

use error_common::Result;
use serde::{Deserialize, Serialize};

use crate::openapi::{normalize_base_path, resource_prefix};
use crate::registry::{validate_segment, ServiceDescriptor};

/// Entry point every router listens on
pub const DEFAULT_ENTRY_POINT: &str = "web";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfiguration {
    pub http: GatewayHttp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GatewayHttp {
    pub routers: BTreeMap<String, GatewayRouter>,
    pub services: BTreeMap<String, GatewayService>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRouter {
    pub rule: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub entry_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayService {
    pub load_balancer: LoadBalancer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub servers: Vec<LoadBalancerServer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerServer {
    pub url: String,
}

impl GatewayConfiguration {
    /// Route every resource of `services` to `address`. Rules match the
    /// operation paths documented under `base_path`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid service id or descriptor.
    pub fn for_services(
        service_id: &str,
        address: &str,
        base_path: &str,
        services: &[ServiceDescriptor],
    ) -> Result<Self> {
        validate_segment("service id", service_id)?;
        let base_path = normalize_base_path(base_path);

        let mut routers = BTreeMap::new();
        for service in services {
            service.validate()?;
            let prefix = resource_prefix(&base_path, service_id, service);
            routers.insert(
                format!("{service_id}-router-{}", service.resource),
                GatewayRouter {
                    rule: format!("PathRegexp(`^{}/.*$`)", escape_regex(&prefix)),
                    service: service_id.to_string(),
                    priority: service.priority,
                    entry_points: vec![DEFAULT_ENTRY_POINT.to_string()],
                },
            );
        }

        let mut gateway_services = BTreeMap::new();
        gateway_services.insert(
            service_id.to_string(),
            GatewayService {
                load_balancer: LoadBalancer {
                    servers: vec![LoadBalancerServer {
                        url: address.to_string(),
                    }],
                },
            },
        );

        Ok(Self {
            http: GatewayHttp {
                routers,
                services: gateway_services,
            },
        })
    }

    /// # Errors
    ///
    /// Propagates YAML serialization failures.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::DocumentBuilder;

    #[test]
    fn one_router_per_resource() {
        let services = vec![
            ServiceDescriptor::new("item", "Items").priority(5),
            ServiceDescriptor::new("order", "Orders").version("v2"),
        ];
        let config =
            GatewayConfiguration::for_services("shop", "http://shop:8080", "/api", &services).unwrap();

        let item = &config.http.routers["shop-router-item"];
        assert_eq!(item.rule, "PathRegexp(`^/api/v1/item/.*$`)");
        assert_eq!(item.priority, Some(5));
        assert_eq!(item.entry_points, vec!["web".to_string()]);

        let order = &config.http.routers["shop-router-order"];
        assert_eq!(order.rule, "PathRegexp(`^/api/v2/order/.*$`)");
        assert_eq!(order.service, "shop");

        assert_eq!(
            config.http.services["shop"].load_balancer.servers[0].url,
            "http://shop:8080"
        );
    }

    #[test]
    fn rules_follow_the_documented_paths() {
        let services = vec![
            ServiceDescriptor::new("item", "Items"),
            ServiceDescriptor::new("resource", "Resources"),
        ];
        let config =
            GatewayConfiguration::for_services("shop", "http://shop:8080", "internal/", &services)
                .unwrap();

        assert_eq!(
            config.http.routers["shop-router-item"].rule,
            "PathRegexp(`^/internal/v1/item/.*$`)"
        );
        assert_eq!(
            config.http.routers["shop-router-resource"].rule,
            "PathRegexp(`^/internal/shop/v1/resource/.*$`)"
        );

        let documented = DocumentBuilder::new("shop")
            .base_path("internal/")
            .operation_path(&services[0], "list");
        assert!(documented.starts_with("/internal/v1/item/"));
    }

    #[test]
    fn regex_metacharacters_in_base_path_are_escaped() {
        let services = vec![ServiceDescriptor::new("item", "Items")];
        let config =
            GatewayConfiguration::for_services("shop", "http://shop:8080", "/api.v2", &services)
                .unwrap();
        assert_eq!(
            config.http.routers["shop-router-item"].rule,
            "PathRegexp(`^/api\\.v2/v1/item/.*$`)"
        );
    }

    #[test]
    fn yaml_uses_proxy_field_names() {
        let services = vec![ServiceDescriptor::new("item", "Items")];
        let yaml = GatewayConfiguration::for_services("shop", "http://shop:8080", "/api", &services)
            .unwrap()
            .to_yaml()
            .unwrap();
        assert!(yaml.contains("entryPoints:"));
        assert!(yaml.contains("loadBalancer:"));
        assert!(!yaml.contains("priority"));

        let parsed: GatewayConfiguration = serde_yaml::from_str(&yaml).unwrap();
        assert!(parsed.http.routers.contains_key("shop-router-item"));
    }
}
