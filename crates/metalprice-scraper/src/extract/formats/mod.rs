//! Extraction strategy implementations.

pub(super) mod auto;
pub(super) mod card_list;
pub(super) mod haruhi;
pub(super) mod houyama;
pub(super) mod item_box;
pub(super) mod kaneda;
pub(super) mod kousyo;
pub(super) mod table;
pub(super) mod touhoku;
pub(super) mod touki;
pub(super) mod yagi;
