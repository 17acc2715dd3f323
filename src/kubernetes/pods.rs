// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod lookups against the API server

use crate::error::{is_not_found, Result};
use crate::types::LabelSelector;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{api::ListParams, Api, Client};
use tracing::{debug, instrument};

/// Read access to pods, by name or by label.
#[async_trait]
pub trait PodSource: Send + Sync {
    /// Fetch a pod. A pod that does not exist yields `Ok(None)`; every other
    /// failure is returned as is.
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Option<Pod>>;

    /// List the pods in `namespace` matching `selector`.
    async fn list_pods(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<Pod>>;
}

/// [`PodSource`] backed by the core/v1 Pods API
#[derive(Clone)]
pub struct KubePods {
    client: Client,
}

impl KubePods {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn api(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl PodSource for KubePods {
    #[instrument(skip(self))]
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Option<Pod>> {
        match self.api(namespace).get(name).await {
            Ok(pod) => Ok(Some(pod)),
            Err(e) if is_not_found(&e) => {
                debug!("Pod {}/{} not found", namespace, name);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, selector), fields(selector = %selector))]
    async fn list_pods(&self, namespace: &str, selector: &LabelSelector) -> Result<Vec<Pod>> {
        let lp = ListParams::default().labels(&selector.to_string());
        let pods = self.api(namespace).list(&lp).await?;
        debug!("Found {} pods matching {}", pods.items.len(), selector);
        Ok(pods.items)
    }
}
