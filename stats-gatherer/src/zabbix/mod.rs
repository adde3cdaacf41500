//! Output towards Zabbix: the payload formats and the `zabbix_sender` process.

pub mod payload;
pub mod sender;

pub use payload::{
    discovery_json,
    item_payload,
    items,
    json_document,
    Item,
    DISCOVERY_KEY,
};
pub use sender::{
    SenderError,
    SenderOutput,
    ZabbixSender,
};
