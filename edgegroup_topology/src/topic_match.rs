// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

use edgegroup_api::endpoint::Endpoint;
use edgegroup_api::participant::{DeviceParticipant, FunctionParticipant, Participant};

/// One (publisher, subject, subscriber) triple produced by topic matching.
/// Duplicates are permitted here; the subscription table builder collapses
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub source: Endpoint,
    pub subject: String,
    pub target: Endpoint,
}

/// Compute every route the group needs: local topic matches between
/// participants, cloud subscriptions in both directions, and the read/write
/// route pair for every connected shadow.
///
/// Topic subjects are compared as exact literal strings. A subject containing
/// wildcard characters only matches an identical subject. Iteration follows
/// declaration order throughout (functions before devices, topics in fragment
/// order), so the output is deterministic for identical input.
pub fn match_routes(functions: &[FunctionParticipant], devices: &[DeviceParticipant]) -> Vec<Route> {
    let participants: Vec<&dyn Participant> = functions
        .iter()
        .map(|function| function as &dyn Participant)
        .chain(devices.iter().map(|device| device as &dyn Participant))
        .collect();

    let mut routes = Vec::new();
    connect_local_topics(&participants, &mut routes);
    connect_cloud_and_shadows(&participants, &mut routes);
    routes
}

fn connect_local_topics(participants: &[&dyn Participant], routes: &mut Vec<Route>) {
    // Index subscribers by topic so matching stays linear in the number of
    // declared topics plus emitted routes.
    let mut subscribers_by_topic: std::collections::HashMap<&str, Vec<Endpoint>> = std::collections::HashMap::new();
    for participant in participants {
        for topic in participant.input_topics() {
            subscribers_by_topic.entry(topic.as_str()).or_default().push(participant.endpoint());
        }
    }

    for participant in participants {
        let source = participant.endpoint();
        for topic in participant.output_topics() {
            if let Some(targets) = subscribers_by_topic.get(topic.as_str()) {
                for target in targets {
                    if *target == source {
                        continue;
                    }
                    log::info!("connecting [{}] to [{}] on topic [{}]", source, target, topic);
                    routes.push(Route {
                        source: source.clone(),
                        subject: topic.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
    }
}

fn connect_cloud_and_shadows(participants: &[&dyn Participant], routes: &mut Vec<Route>) {
    for participant in participants {
        let endpoint = participant.endpoint();

        for topic in participant.to_cloud_subscriptions() {
            log::info!("connecting [{}] to the cloud on topic [{}]", endpoint, topic);
            routes.push(Route {
                source: endpoint.clone(),
                subject: topic.clone(),
                target: Endpoint::Cloud,
            });
        }

        for topic in participant.from_cloud_subscriptions() {
            log::info!("connecting the cloud to [{}] on topic [{}]", endpoint, topic);
            routes.push(Route {
                source: Endpoint::Cloud,
                subject: topic.clone(),
                target: endpoint.clone(),
            });
        }

        for shadow_device in participant.connected_shadows() {
            let subject = Endpoint::shadow_topic_filter(shadow_device);
            log::info!("connecting [{}] to the shadow of [{}]", endpoint, shadow_device);
            routes.push(Route {
                source: endpoint.clone(),
                subject: subject.clone(),
                target: Endpoint::Shadow(shadow_device.clone()),
            });
            routes.push(Route {
                source: Endpoint::Shadow(shadow_device.clone()),
                subject,
                target: endpoint.clone(),
            });
        }
    }
}
