#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod audit;
pub mod config;
pub mod error;
pub mod events;
pub mod manager;
pub mod request;

pub mod model {
    pub use ldp_fusion_model::*;
}

pub mod common {
    pub use ldp_fusion_common::*;
}

pub mod storage {
    pub use ldp_fusion_storage::*;
}

pub mod webac {
    pub use ldp_fusion_webac::*;
}
