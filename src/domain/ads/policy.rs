use uuid::Uuid;

use super::entities::Ad;

/// Centralized ownership rule for ads.
///
/// Takes the acting identity (None for anonymous callers) and the resource,
/// and answers whether the actor owns it. Both the `is_owner` response flag
/// and the delete authorization go through this single place.
pub struct AdOwnershipPolicy;

impl AdOwnershipPolicy {
  pub fn allows(actor: Option<Uuid>, ad: &Ad) -> bool {
    match actor {
      Some(user_id) => ad.author_id == user_id,
      None => false,
    }
  }
}
