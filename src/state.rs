use near_client::{RpcError, Transport};
use serde::Serialize;

use crate::config::RoleAccounts;
use crate::contract::DroplinkedContract;
use crate::logs::STATE_TARGET;
use crate::types::{ApprovedRecord, HolderRecord, RecordId};

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub producer_holders: Vec<HolderRecord>,
    pub publisher_holders: Vec<HolderRecord>,
    pub customer_holders: Vec<HolderRecord>,
    pub producer_requests: Vec<RecordId>,
    pub publisher_requests: Vec<RecordId>,
    pub producer_approved: Vec<ApprovedRecord>,
    pub publisher_approved: Vec<ApprovedRecord>,
}

/// A lookup that failed and was replaced by an empty value in the snapshot.
#[derive(Debug)]
pub struct LookupFailure {
    pub method_name: &'static str,
    pub subject: String,
    pub error: RpcError,
}

#[derive(Debug, Default)]
pub struct SnapshotReport {
    pub snapshot: StateSnapshot,
    pub failures: Vec<LookupFailure>,
}

pub async fn build_snapshot<T: Transport>(
    contract: &DroplinkedContract<T>,
    accounts: &RoleAccounts,
) -> StateSnapshot {
    build_snapshot_report(contract, accounts).await.snapshot
}

/// Builds the snapshot and keeps track of every lookup that had to be emptied.
pub async fn build_snapshot_report<T: Transport>(
    contract: &DroplinkedContract<T>,
    accounts: &RoleAccounts,
) -> SnapshotReport {
    let mut failures = Vec::new();

    let producer_holders = holders_of(contract, &accounts.producer, &mut failures).await;
    let publisher_holders = holders_of(contract, &accounts.publisher, &mut failures).await;
    let customer_holders = holders_of(contract, &accounts.customer, &mut failures).await;

    let producer_requests = or_empty(
        contract.get_producer_requests(&accounts.producer).await,
        "get_producer_requests",
        &accounts.producer,
        &mut failures,
    );
    let publisher_requests = or_empty(
        contract.get_publisher_requests(&accounts.publisher).await,
        "get_publisher_requests",
        &accounts.publisher,
        &mut failures,
    );

    let producer_approved_ids = or_empty(
        contract.producers_approved(&accounts.producer).await,
        "producers_approved",
        &accounts.producer,
        &mut failures,
    );
    let producer_approved = resolve_approved(contract, producer_approved_ids, &mut failures).await;
    let publisher_approved_ids = or_empty(
        contract.publishers_approved(&accounts.publisher).await,
        "publishers_approved",
        &accounts.publisher,
        &mut failures,
    );
    let publisher_approved = resolve_approved(contract, publisher_approved_ids, &mut failures).await;

    if !failures.is_empty() {
        tracing::info!(target: STATE_TARGET, "Snapshot built with {} failed lookups", failures.len());
    }

    SnapshotReport {
        snapshot: StateSnapshot {
            producer_holders,
            publisher_holders,
            customer_holders,
            producer_requests,
            publisher_requests,
            producer_approved,
            publisher_approved,
        },
        failures,
    }
}

async fn holders_of<T: Transport>(
    contract: &DroplinkedContract<T>,
    account_id: &str,
    failures: &mut Vec<LookupFailure>,
) -> Vec<HolderRecord> {
    let holder_ids = or_empty(
        contract.get_owner_tokens(account_id).await,
        "get_owner_tokens",
        account_id,
        failures,
    );

    let mut holders = Vec::with_capacity(holder_ids.len());
    for holder_id in holder_ids {
        let holder = or_empty(
            contract.get_holder(holder_id).await,
            "get_holder",
            &holder_id.to_string(),
            failures,
        );
        holders.push(HolderRecord { holder_id, holder });
    }
    holders
}

async fn resolve_approved<T: Transport>(
    contract: &DroplinkedContract<T>,
    approved_ids: Vec<RecordId>,
    failures: &mut Vec<LookupFailure>,
) -> Vec<ApprovedRecord> {
    let mut approved = Vec::with_capacity(approved_ids.len());
    for approved_id in approved_ids {
        let record = or_empty(
            contract.get_approved(approved_id).await,
            "get_approved",
            &approved_id.to_string(),
            failures,
        );
        approved.push(ApprovedRecord {
            approved_id,
            approved: record,
        });
    }
    approved
}

fn or_empty<V: Default>(
    result: Result<V, RpcError>,
    method_name: &'static str,
    subject: &str,
    failures: &mut Vec<LookupFailure>,
) -> V {
    result.unwrap_or_else(|error| {
        tracing::warn!(target: STATE_TARGET, "{}({}) failed, using empty value: {}", method_name, subject, error);
        failures.push(LookupFailure {
            method_name,
            subject: subject.to_string(),
            error,
        });
        V::default()
    })
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use near_client::test_utils::{MockReply, MockTransport};
    use serde_json::json;

    use crate::test_utils::{contract_with, role_accounts};

    #[tokio::test]
    async fn customer_tokens_resolve_in_order() {
        let transport = MockTransport::new()
            .on("get_owner_tokens", |args| match args["account_id"].as_str() {
                Some("cust_droplinked.testnet") => MockReply::json(json!([1, 2])),
                _ => MockReply::Bytes(vec![91, 93]),
            })
            .on("get_holder", |args| MockReply::json(json!({"token_id": args["holder_id"]})))
            .on("get_producer_requests", |_| MockReply::Bytes(vec![91, 93]))
            .on("get_publisher_requests", |_| MockReply::Bytes(vec![91, 93]))
            .on("producers_approved", |_| MockReply::Bytes(vec![91, 93]))
            .on("publishers_approved", |_| MockReply::Bytes(vec![91, 93]));
        let contract = contract_with(transport);

        let report = build_snapshot_report(&contract, &role_accounts()).await;

        assert!(report.failures.is_empty());
        assert_eq!(
            contract.client().transport().calls_to("get_holder"),
            vec![json!({"holder_id": 1}), json!({"holder_id": 2})]
        );
        assert_json_eq!(
            json!(report.snapshot.customer_holders),
            json!([
                {"holder_id": 1, "holder": {"token_id": 1}},
                {"holder_id": 2, "holder": {"token_id": 2}},
            ])
        );
    }

    #[tokio::test]
    async fn duplicate_ids_are_resolved_each_time() {
        let transport = MockTransport::new()
            .on("get_owner_tokens", |args| match args["account_id"].as_str() {
                Some("prod_droplinked.testnet") => MockReply::json(json!([3, 3])),
                _ => MockReply::json(json!([])),
            })
            .on("get_holder", |_| MockReply::json(json!({})));
        let contract = contract_with(transport);

        let snapshot = build_snapshot(&contract, &role_accounts()).await;

        assert_eq!(snapshot.producer_holders.len(), 2);
        assert_eq!(contract.client().transport().calls_to("get_holder").len(), 2);
    }

    #[tokio::test]
    async fn ids_past_u64_are_resolved_with_the_rest() {
        let transport = MockTransport::new()
            .on("get_owner_tokens", |args| match args["account_id"].as_str() {
                Some("cust_droplinked.testnet") => MockReply::Bytes(b"[1,18446744073709551616]".to_vec()),
                _ => MockReply::json(json!([])),
            })
            .on("get_holder", |args| MockReply::json(json!({"token_id": args["holder_id"]})));
        let contract = contract_with(transport);

        let snapshot = build_snapshot(&contract, &role_accounts()).await;

        let holder_ids: Vec<RecordId> = snapshot.customer_holders.iter().map(|record| record.holder_id).collect();
        assert_eq!(holder_ids, vec![1, 18_446_744_073_709_551_616]);
        assert_eq!(
            serde_json::to_string(&snapshot.customer_holders[1]).unwrap(),
            r#"{"holder_id":18446744073709551616,"holder":{"token_id":18446744073709551616}}"#
        );
    }

    #[tokio::test]
    async fn requests_stay_unresolved_and_approvals_resolve() {
        let transport = MockTransport::new()
            .on("get_owner_tokens", |_| MockReply::json(json!([])))
            .on("get_producer_requests", |_| MockReply::json(json!("[1,2,]")))
            .on("get_publisher_requests", |_| MockReply::json(json!("[2,]")))
            .on("producers_approved", |_| MockReply::json(json!([5])))
            .on("publishers_approved", |_| MockReply::json(json!([])))
            .on("get_approved", |args| MockReply::json(json!({"approved_id": args["approved_id"]})));
        let contract = contract_with(transport);

        let snapshot = build_snapshot(&contract, &role_accounts()).await;

        assert_eq!(snapshot.producer_requests, vec![1, 2]);
        assert_eq!(snapshot.publisher_requests, vec![2]);
        assert!(contract.client().transport().calls_to("get_request").is_empty());
        assert_json_eq!(
            json!(snapshot.producer_approved),
            json!([{"approved_id": 5, "approved": {"approved_id": 5}}])
        );
        assert!(snapshot.publisher_approved.is_empty());
    }

    #[tokio::test]
    async fn failed_lookups_become_empty_values() {
        let transport = MockTransport::new()
            .on("get_owner_tokens", |args| match args["account_id"].as_str() {
                Some("pub_droplinked.testnet") => MockReply::json(json!([4])),
                _ => MockReply::json(json!({})),
            })
            .on("get_holder", |_| MockReply::Fail("timed out".to_string()));
        let contract = contract_with(transport);

        let report = build_snapshot_report(&contract, &role_accounts()).await;

        assert_json_eq!(
            json!(report.snapshot.publisher_holders),
            json!([{"holder_id": 4, "holder": {}}])
        );
        assert!(report.snapshot.producer_holders.is_empty());
        assert!(report.snapshot.customer_holders.is_empty());
        // get_owner_tokens x2, get_holder, and the four unregistered listings
        assert_eq!(report.failures.len(), 7);
        assert!(report
            .failures
            .iter()
            .any(|failure| failure.method_name == "get_holder" && failure.subject == "4"));
    }
}
