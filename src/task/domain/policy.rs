//! Authorization policy: pure predicates over `(caller, task)`.
//!
//! Read visibility extends to the admin role, the creator, and the
//! assignee. Write permission extends to the admin role and the creator
//! only; assignment never grants write permission. An absent caller sees
//! and mutates nothing.

use super::Task;
use crate::identity::domain::Actor;

/// Returns whether the caller may see the task.
#[must_use]
pub fn can_view(actor: Option<&Actor>, task: &Task) -> bool {
    actor.is_some_and(|actor| {
        actor.is_admin()
            || task.created_by() == actor.id
            || task.assigned_to() == Some(actor.id)
    })
}

/// Returns whether the caller may update or delete the task.
#[must_use]
pub fn can_modify(actor: Option<&Actor>, task: &Task) -> bool {
    actor.is_some_and(|actor| actor.is_admin() || task.created_by() == actor.id)
}
