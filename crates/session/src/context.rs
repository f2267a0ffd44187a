//! SessionContext - injected state for one authenticated session

use access::{AccessDecision, AccessPolicy, AccessRequirements, RoleMatrix};
use audit::AccessLog;
use cache::ResponseCache;
use serde_json::Value;
use shared::{Actor, SessionConfig};
use std::time::Duration;
use uuid::Uuid;

/// Everything one browser session needs: cache, policy, audit log.
///
/// Replaces the module-scoped singletons of the original application with
/// an explicitly constructed value owned by the caller.
#[derive(Debug)]
pub struct SessionContext {
    session_id: Uuid,
    cache: ResponseCache,
    policy: AccessPolicy,
    audit: AccessLog,
}

impl SessionContext {
    /// Compose a session from configuration
    pub fn new(config: SessionConfig) -> Self {
        let matrix = RoleMatrix::builtin().with_extra_roles(config.extra_roles);

        Self {
            session_id: Uuid::new_v4(),
            cache: ResponseCache::from_settings(&config.cache),
            policy: AccessPolicy::new(matrix),
            audit: AccessLog::new(config.audit.max_entries),
        }
    }

    /// Identifier attached to every audit entry of this session
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The access policy
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// The response cache
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Mutable access to the response cache
    pub fn cache_mut(&mut self) -> &mut ResponseCache {
        &mut self.cache
    }

    /// The audit log
    pub fn audit(&self) -> &AccessLog {
        &self.audit
    }

    /// Evaluate requirements for an actor, recording the outcome.
    ///
    /// Denials land in the audit log and a `tracing` warning; the decision
    /// itself is returned for the caller to render.
    pub fn authorize(
        &mut self,
        actor: &Actor,
        requirements: &AccessRequirements,
    ) -> AccessDecision {
        let decision = self.policy.check_access(actor, requirements);
        self.audit
            .log_decision(self.session_id, actor, requirements, &decision);

        if decision.is_denied() {
            tracing::warn!(
                actor = %actor.id,
                role = %actor.role,
                reason = decision.reason.as_deref().unwrap_or(""),
                "access denied"
            );
        } else {
            tracing::debug!(actor = %actor.id, role = %actor.role, "access granted");
        }

        decision
    }

    /// Serve `key` from the cache, or call `loader` and memoize its result.
    ///
    /// Loader failures propagate to the caller and are not cached. A `ttl`
    /// of `None` uses the configured default.
    pub fn fetch_cached<E>(
        &mut self,
        key: &str,
        ttl: Option<Duration>,
        loader: impl FnOnce() -> Result<Value, E>,
    ) -> Result<Value, E> {
        if let Some(value) = self.cache.get(key) {
            tracing::debug!(key, "serving backend response from cache");
            return Ok(value.clone());
        }

        let value = loader()?;
        let ttl = ttl.unwrap_or_else(|| self.cache.default_ttl());
        self.cache.set_with_ttl(key, value.clone(), ttl);
        Ok(value)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
