//! Post-commit mutation pipeline
//!
//! Entity create/update/delete calls run through [`MutationPipeline`], which
//! records exactly one activity entry after the backend confirms success.
//! The mutation's own result is returned untouched.

use serde_json::Value;
use shared::{ActivityLogEntry, MutationKind};
use std::future::Future;
use std::sync::Arc;

use crate::activity::ActivityLogger;
use crate::rights::DerivedPermission;
use crate::session::SessionState;
use crate::{ClientError, ClientResult};

/// Administrable entity section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Hero,
    Testimonial,
    Blog,
    College,
    User,
    Role,
    Profession,
    Source,
    Target,
    University,
    Enquiry,
    AgsDelegate,
}

impl Section {
    /// Label stored in the activity log
    pub fn label(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Hero => "Hero",
            Section::Testimonial => "Testimonial",
            Section::Blog => "Blog",
            Section::College => "College",
            Section::User => "User",
            Section::Role => "Role",
            Section::Profession => "Profession",
            Section::Source => "Source",
            Section::Target => "Target",
            Section::University => "University",
            Section::Enquiry => "Enquiry",
            Section::AgsDelegate => "AGS Delegate",
        }
    }

    /// Admin list page of the section
    pub fn link(self) -> &'static str {
        match self {
            Section::About => "/about",
            Section::Hero => "/hero",
            Section::Testimonial => "/testimonial",
            Section::Blog => "/blog",
            Section::College => "/college",
            Section::User => "/user",
            Section::Role => "/role",
            Section::Profession => "/profession",
            Section::Source => "/source",
            Section::Target => "/target",
            Section::University => "/university",
            Section::Enquiry => "/enquiry",
            Section::AgsDelegate => "/ags-delegate",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Description of one mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub kind: MutationKind,
    pub section: Section,
    /// Title/name of the affected record
    pub subject: Option<String>,
    pub data: Option<Value>,
}

impl Change {
    pub fn new(kind: MutationKind, section: Section) -> Self {
        Self {
            kind,
            section,
            subject: None,
            data: None,
        }
    }

    pub fn create(section: Section) -> Self {
        Self::new(MutationKind::Create, section)
    }

    pub fn update(section: Section) -> Self {
        Self::new(MutationKind::Update, section)
    }

    pub fn delete(section: Section) -> Self {
        Self::new(MutationKind::Delete, section)
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Build the activity entry attributed to `actor`
    fn to_entry(&self, actor_id: Option<String>, actor_name: Option<&str>) -> ActivityLogEntry {
        let mut message = format!(
            "{} {} {} entry",
            actor_name.unwrap_or("Unknown user"),
            self.kind.verb(),
            self.section
        );
        if let Some(subject) = &self.subject {
            message.push_str(&format!(" \"{}\"", subject));
        }

        ActivityLogEntry {
            user_id: actor_id,
            message,
            link: self.section.link().to_string(),
            section: self.section.label().to_string(),
            data: self.data.clone(),
        }
    }
}

/// Runs mutations and records their activity after commit
#[derive(Debug, Clone)]
pub struct MutationPipeline {
    logger: ActivityLogger,
    session: Arc<SessionState>,
}

impl MutationPipeline {
    pub fn new(logger: ActivityLogger, session: Arc<SessionState>) -> Self {
        Self { logger, session }
    }

    /// Await `op`; on success record one activity entry for `change`
    pub async fn run<T, Fut>(&self, change: Change, op: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let result = op.await;

        match &result {
            Ok(_) => {
                let user = self.session.current_user();
                let entry = change.to_entry(
                    user.as_ref().map(|u| u.id.clone()),
                    user.as_ref().map(|u| u.username.as_str()),
                );
                self.logger.record(entry);
            }
            Err(e) => {
                tracing::debug!(
                    section = %change.section,
                    kind = %change.kind,
                    "Mutation failed, no activity recorded: {}",
                    e
                );
            }
        }

        result
    }

    /// Like [`Self::run`], but refuses before `op` starts when `permission`
    /// does not allow the change
    pub async fn run_gated<T, Fut>(
        &self,
        permission: &DerivedPermission,
        change: Change,
        op: Fut,
    ) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        if !permission.allows(change.kind) {
            return Err(ClientError::Forbidden(format!(
                "{} {} not permitted",
                change.kind, change.section
            )));
        }
        self.run(change, op).await
    }
}
