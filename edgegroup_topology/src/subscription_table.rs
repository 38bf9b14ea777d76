// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

use edgegroup_api::endpoint::Endpoint;
use edgegroup_api::subscription::Subscription;

use crate::topic_match::Route;
use crate::TopologyError;

// Namespace for subscription ids. Ids are the v5 digest of the route's wire
// identities, so re-synthesizing identical input yields identical ids.
const SUBSCRIPTION_ID_NAMESPACE: uuid::Uuid = uuid::uuid!("06df95ae-4b4e-4b38-9b0e-6a31f874f8ca");

/// Turn the matcher's route triples into the final subscription table:
/// duplicates collapse to their first occurrence, every surviving route gets
/// a unique, stable id.
///
/// A route whose source equals its target is rejected. The matcher never
/// emits one; seeing it here means the matcher is broken, so the whole
/// synthesis fails rather than installing a malformed table.
pub fn build_subscription_table(routes: Vec<Route>) -> Result<Vec<Subscription>, TopologyError> {
    let mut unique_routes: Vec<Route> = Vec::new();
    for route in routes {
        if !unique_routes.contains(&route) {
            unique_routes.push(route);
        }
    }

    let mut subscriptions = Vec::with_capacity(unique_routes.len());
    for route in unique_routes {
        if route.source == route.target {
            return Err(TopologyError::SelfRoute {
                endpoint: route.source.to_string(),
                subject: route.subject,
            });
        }

        subscriptions.push(Subscription {
            id: subscription_id(&route),
            source: route.source,
            subject: route.subject,
            target: route.target,
        });
    }

    Ok(subscriptions)
}

fn subscription_id(route: &Route) -> uuid::Uuid {
    let key = format!("{}|{}|{}", endpoint_key(&route.source), route.subject, endpoint_key(&route.target));
    uuid::Uuid::new_v5(&SUBSCRIPTION_ID_NAMESPACE, key.as_bytes())
}

// Wire identities alone do not discriminate: a function reference may equal a
// device thing name, and every shadow shares the shadow service identity.
fn endpoint_key(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Function(reference) => format!("function:{}", reference),
        Endpoint::Device(thing_name) => format!("device:{}", thing_name),
        Endpoint::Cloud => "cloud:".to_string(),
        Endpoint::Shadow(device) => format!("shadow:{}", device),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(source: &str, subject: &str, target: &str) -> Route {
        Route {
            source: Endpoint::Function(source.to_string()),
            subject: subject.to_string(),
            target: Endpoint::Function(target.to_string()),
        }
    }

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        let routes = vec![route("f1", "a", "f2"), route("f1", "b", "f2"), route("f1", "a", "f2")];

        let table = build_subscription_table(routes).unwrap();

        assert_eq!(2, table.len());
        assert_eq!("a", table[0].subject);
        assert_eq!("b", table[1].subject);
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let routes = vec![route("f1", "a", "f2"), route("f2", "a", "f1"), route("f1", "b", "f2")];

        let first = build_subscription_table(routes.clone()).unwrap();
        let second = build_subscription_table(routes).unwrap();

        assert_eq!(first, second);
        let mut ids: Vec<uuid::Uuid> = first.iter().map(|subscription| subscription.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(3, ids.len());
    }

    #[test]
    fn test_ids_distinguish_endpoint_kinds() {
        // A function and a device may carry the same identity string; the
        // shadow service identity is shared by every shadow. Their ids must
        // still differ.
        let sink = Endpoint::Function("sink".to_string());
        let routes = vec![
            Route {
                source: Endpoint::Function("gw".to_string()),
                subject: "t".to_string(),
                target: sink.clone(),
            },
            Route {
                source: Endpoint::Device("gw".to_string()),
                subject: "t".to_string(),
                target: sink.clone(),
            },
            Route {
                source: Endpoint::Function("cloud".to_string()),
                subject: "t".to_string(),
                target: sink.clone(),
            },
            Route {
                source: Endpoint::Cloud,
                subject: "t".to_string(),
                target: sink,
            },
        ];

        let table = build_subscription_table(routes).unwrap();

        assert_eq!(4, table.len());
        let mut ids: Vec<uuid::Uuid> = table.iter().map(|subscription| subscription.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(4, ids.len());
    }

    #[test]
    fn test_self_route_is_a_fatal_fault() {
        let routes = vec![route("f1", "a", "f2"), route("f1", "loop", "f1")];

        match build_subscription_table(routes) {
            Err(TopologyError::SelfRoute { endpoint, subject }) => {
                assert_eq!("f1", endpoint);
                assert_eq!("loop", subject);
            }
            other => panic!("expected a self-route fault, got {:?}", other),
        }
    }
}
