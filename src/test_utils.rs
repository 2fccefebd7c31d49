use near_client::test_utils::{
    get_server_addr, MockTransport, CONTRACT_ACCOUNT_ID, CUSTOMER_ACCOUNT, PRODUCER_ACCOUNT,
    PUBLISHER_ACCOUNT,
};
use near_client::ViewClient;

use crate::config::RoleAccounts;
use crate::contract::DroplinkedContract;

pub fn contract_with(transport: MockTransport) -> DroplinkedContract<MockTransport> {
    DroplinkedContract::new(ViewClient::new(
        transport,
        get_server_addr(),
        CONTRACT_ACCOUNT_ID.to_string(),
    ))
}

pub fn role_accounts() -> RoleAccounts {
    RoleAccounts {
        producer: PRODUCER_ACCOUNT.to_string(),
        publisher: PUBLISHER_ACCOUNT.to_string(),
        customer: CUSTOMER_ACCOUNT.to_string(),
    }
}
