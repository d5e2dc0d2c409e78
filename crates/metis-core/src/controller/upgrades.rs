use chrono::Utc;

use super::types::{UpgradeRequest, UpgradeStatus};
use crate::error::{Error, Result};

/// Append-only, index-addressed queue of upgrade requests.
///
/// Requests are never removed, so `id` (assigned as the queue length at
/// submission) stays dense and stable. Approve/reject simply overwrite
/// the status; an already-resolved request can be re-settled.
#[derive(Default)]
pub struct UpgradeQueue {
    requests: Vec<UpgradeRequest>,
}

impl UpgradeQueue {
    /// Append a new pending request and return it.
    pub fn submit(&mut self, user: &str, proposal: &str) -> UpgradeRequest {
        let request = UpgradeRequest {
            id: self.requests.len(),
            user: user.to_owned(),
            proposal: proposal.to_owned(),
            status: UpgradeStatus::Pending,
            submitted_at: Utc::now(),
        };
        self.requests.push(request.clone());
        request
    }

    /// Overwrite the status of request `id`, returning the updated record.
    pub fn set_status(&mut self, id: usize, status: UpgradeStatus) -> Result<UpgradeRequest> {
        match self.requests.get_mut(id) {
            Some(request) => {
                request.status = status;
                Ok(request.clone())
            }
            None => Err(Error::RequestNotFound { id }),
        }
    }

    /// Every request ever submitted, in id order.
    pub fn all(&self) -> &[UpgradeRequest] {
        &self.requests
    }

    /// Number of requests submitted so far.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// True when nothing has been submitted.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_stable() {
        let mut queue = UpgradeQueue::default();
        assert!(queue.is_empty());
        for i in 0..5 {
            let request = queue.submit("alice", &format!("proposal {i}"));
            assert_eq!(request.id, i);
            assert_eq!(request.status, UpgradeStatus::Pending);
        }
        let ids: Vec<_> = queue.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_set_status_touches_only_target() {
        let mut queue = UpgradeQueue::default();
        queue.submit("alice", "add memory");
        queue.submit("bob", "add tools");

        let updated = queue.set_status(0, UpgradeStatus::Approved).unwrap();
        assert_eq!(updated.status, UpgradeStatus::Approved);
        assert_eq!(queue.all()[1].status, UpgradeStatus::Pending);
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let mut queue = UpgradeQueue::default();
        queue.submit("alice", "add memory");

        let err = queue.set_status(5, UpgradeStatus::Approved).unwrap_err();
        assert_eq!(err, Error::RequestNotFound { id: 5 });
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_status_is_resettable() {
        let mut queue = UpgradeQueue::default();
        queue.submit("alice", "add memory");

        queue.set_status(0, UpgradeStatus::Rejected).unwrap();
        let updated = queue.set_status(0, UpgradeStatus::Approved).unwrap();
        assert_eq!(updated.status, UpgradeStatus::Approved);
    }
}
