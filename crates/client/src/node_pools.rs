//! Node-pool operations, including the attachment subresources.

use std::sync::Arc;

use autoglue_application::AuthExecutor;
use autoglue_domain::{
    Annotation, CreateNodePoolRequest, Label, NodePool, Server, Taint, UpdateNodePoolRequest,
};
use autoglue_infrastructure::{ApiClient, ApiError};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct AttachServers<'a> {
    server_ids: &'a [Uuid],
}

#[derive(Serialize)]
struct AttachLabels<'a> {
    label_ids: &'a [Uuid],
}

#[derive(Serialize)]
struct AttachTaints<'a> {
    taint_ids: &'a [Uuid],
}

#[derive(Serialize)]
struct AttachAnnotations<'a> {
    annotation_ids: &'a [Uuid],
}

/// Client for the `/api/v1/node-pools` endpoints.
pub struct NodePoolsClient {
    api: Arc<ApiClient>,
    executor: Arc<AuthExecutor>,
}

impl NodePoolsClient {
    pub(crate) fn new(api: Arc<ApiClient>, executor: Arc<AuthExecutor>) -> Self {
        Self { api, executor }
    }

    /// Lists the active organization's node pools.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn list(&self) -> Result<Vec<NodePool>, ApiError> {
        self.executor
            .execute(|| self.api.get_json("/api/v1/node-pools"))
            .await
    }

    /// Fetches one node pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error, including 404 for unknown ids.
    pub async fn get(&self, id: Uuid) -> Result<NodePool, ApiError> {
        let path = format!("/api/v1/node-pools/{id}");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Creates a node pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when creation is rejected.
    pub async fn create(&self, request: &CreateNodePoolRequest) -> Result<NodePool, ApiError> {
        self.executor
            .execute(|| self.api.post_json("/api/v1/node-pools", request))
            .await
    }

    /// Updates a node pool; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the update is rejected.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateNodePoolRequest,
    ) -> Result<NodePool, ApiError> {
        let path = format!("/api/v1/node-pools/{id}");
        self.executor
            .execute(|| {
                self.api
                    .patch_json(&path, request)
            })
            .await
    }

    /// Deletes a node pool. Attached servers are released, not deleted.
    ///
    /// # Errors
    ///
    /// Returns the server's error when deletion is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/node-pools/{id}");
        self.executor
            .execute(|| self.api.delete(&path))
            .await
    }

    /// Lists a pool's attached servers.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn servers(&self, id: Uuid) -> Result<Vec<Server>, ApiError> {
        let path = format!("/api/v1/node-pools/{id}/servers");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Attaches servers to a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when any id does not belong to the
    /// active organization.
    pub async fn attach_servers(&self, id: Uuid, server_ids: &[Uuid]) -> Result<(), ApiError> {
        let body = AttachServers { server_ids };
        let path = format!("/api/v1/node-pools/{id}/servers");
        self.executor
            .execute(|| {
                self.api
                    .post_empty(&path, &body)
            })
            .await
    }

    /// Detaches one server from a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_server(&self, id: Uuid, server_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/node-pools/{id}/servers/{server_id}");
        self.executor
            .execute(|| {
                self.api
                    .delete(&path)
            })
            .await
    }

    /// Lists a pool's attached labels.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn labels(&self, id: Uuid) -> Result<Vec<Label>, ApiError> {
        let path = format!("/api/v1/node-pools/{id}/labels");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Attaches labels to a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when any id does not belong to the
    /// active organization.
    pub async fn attach_labels(&self, id: Uuid, label_ids: &[Uuid]) -> Result<(), ApiError> {
        let body = AttachLabels { label_ids };
        let path = format!("/api/v1/node-pools/{id}/labels");
        self.executor
            .execute(|| {
                self.api
                    .post_empty(&path, &body)
            })
            .await
    }

    /// Detaches one label from a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_label(&self, id: Uuid, label_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/node-pools/{id}/labels/{label_id}");
        self.executor
            .execute(|| {
                self.api
                    .delete(&path)
            })
            .await
    }

    /// Lists a pool's attached taints.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn taints(&self, id: Uuid) -> Result<Vec<Taint>, ApiError> {
        let path = format!("/api/v1/node-pools/{id}/taints");
        self.executor
            .execute(|| self.api.get_json(&path))
            .await
    }

    /// Attaches taints to a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when any id does not belong to the
    /// active organization.
    pub async fn attach_taints(&self, id: Uuid, taint_ids: &[Uuid]) -> Result<(), ApiError> {
        let body = AttachTaints { taint_ids };
        let path = format!("/api/v1/node-pools/{id}/taints");
        self.executor
            .execute(|| {
                self.api
                    .post_empty(&path, &body)
            })
            .await
    }

    /// Detaches one taint from a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_taint(&self, id: Uuid, taint_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/node-pools/{id}/taints/{taint_id}");
        self.executor
            .execute(|| {
                self.api
                    .delete(&path)
            })
            .await
    }

    /// Lists a pool's attached annotations.
    ///
    /// # Errors
    ///
    /// Returns the server's error when the listing fails.
    pub async fn annotations(&self, id: Uuid) -> Result<Vec<Annotation>, ApiError> {
        let path = format!("/api/v1/node-pools/{id}/annotations");
        self.executor
            .execute(|| {
                self.api
                    .get_json(&path)
            })
            .await
    }

    /// Attaches annotations to a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when any id does not belong to the
    /// active organization.
    pub async fn attach_annotations(
        &self,
        id: Uuid,
        annotation_ids: &[Uuid],
    ) -> Result<(), ApiError> {
        let body = AttachAnnotations { annotation_ids };
        let path = format!("/api/v1/node-pools/{id}/annotations");
        self.executor
            .execute(|| {
                self.api
                    .post_empty(&path, &body)
            })
            .await
    }

    /// Detaches one annotation from a pool.
    ///
    /// # Errors
    ///
    /// Returns the server's error when detachment is rejected.
    pub async fn detach_annotation(&self, id: Uuid, annotation_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/api/v1/node-pools/{id}/annotations/{annotation_id}");
        self.executor
            .execute(|| {
                self.api.delete(&path)
            })
            .await
    }
}

impl std::fmt::Debug for NodePoolsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodePoolsClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attach_payload_shapes() {
        let id = Uuid::nil();
        let servers = AttachServers { server_ids: &[id] };
        assert_eq!(
            serde_json::to_string(&servers).unwrap(),
            format!("{{\"server_ids\":[\"{id}\"]}}")
        );

        let labels = AttachLabels { label_ids: &[] };
        assert_eq!(serde_json::to_string(&labels).unwrap(), "{\"label_ids\":[]}");
    }
}
