//! Resource models and request payloads for the AutoGlue REST API.
//!
//! Shapes mirror the server's JSON contracts: snake_case fields, UUID
//! identifiers, RFC 3339 timestamps.

mod action;
mod annotation;
mod cluster;
mod credential;
mod dns;
mod job;
mod label;
mod load_balancer;
mod meta;
mod node_pool;
mod organization;
mod server;
mod ssh_key;
mod taint;
mod user;

pub use action::{Action, CreateActionRequest, UpdateActionRequest};
pub use annotation::{Annotation, CreateAnnotationRequest, UpdateAnnotationRequest};
pub use cluster::{
    Cluster, ClusterRun, CreateClusterRequest, SetKubeconfigRequest, UpdateClusterRequest,
};
pub use credential::{Credential, CreateCredentialRequest, UpdateCredentialRequest};
pub use dns::{
    CreateDomainRequest, CreateRecordSetRequest, DnsDomain, RecordSet, UpdateDomainRequest,
    UpdateRecordSetRequest,
};
pub use job::{EnqueueJobRequest, Job, JobPage, JobStatus, QueueInfo};
pub use label::{CreateLabelRequest, Label, UpdateLabelRequest};
pub use load_balancer::{CreateLoadBalancerRequest, LoadBalancer, UpdateLoadBalancerRequest};
pub use meta::VersionInfo;
pub use node_pool::{CreateNodePoolRequest, NodePool, NodePoolRole, UpdateNodePoolRequest};
pub use organization::{
    CreateOrganizationRequest, InviteMemberRequest, Member, Organization,
    UpdateOrganizationRequest,
};
pub use server::{CreateServerRequest, Server, ServerRole, ServerStatus, UpdateServerRequest};
pub use ssh_key::{CreateSshKeyRequest, SshKey, SshKeyMaterial};
pub use taint::{CreateTaintRequest, Taint, TaintEffect, UpdateTaintRequest};
pub use user::{ApiKey, CreateApiKeyRequest, UpdateProfileRequest, UserProfile};
