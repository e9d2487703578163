//! AutoGlue Domain - Core client types
//!
//! This crate defines the domain model for the AutoGlue API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod resources;

pub use auth::{
    ForgotPasswordRequest, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest,
    ResendVerificationRequest, ResetPasswordRequest, SessionProfile, TokenPair, decode_access_exp,
};
pub use error::{DomainError, DomainResult};
pub use resources::{
    Action, Annotation, ApiKey, Cluster, ClusterRun, CreateActionRequest, CreateAnnotationRequest,
    CreateApiKeyRequest, CreateClusterRequest, CreateCredentialRequest, CreateDomainRequest,
    CreateLabelRequest, CreateLoadBalancerRequest, CreateNodePoolRequest,
    CreateOrganizationRequest, CreateRecordSetRequest, CreateServerRequest, CreateSshKeyRequest,
    CreateTaintRequest, Credential, DnsDomain, EnqueueJobRequest, InviteMemberRequest, Job,
    JobPage, JobStatus, Label, LoadBalancer, Member, NodePool, NodePoolRole, Organization,
    QueueInfo, RecordSet, Server, ServerRole, ServerStatus, SetKubeconfigRequest, SshKey,
    SshKeyMaterial, Taint, TaintEffect, UpdateActionRequest, UpdateAnnotationRequest,
    UpdateClusterRequest, UpdateCredentialRequest, UpdateDomainRequest, UpdateLabelRequest,
    UpdateLoadBalancerRequest, UpdateNodePoolRequest, UpdateOrganizationRequest,
    UpdateProfileRequest, UpdateRecordSetRequest, UpdateServerRequest, UpdateTaintRequest,
    UserProfile, VersionInfo,
};
