//! Item and configuration identity checks.

use plm_oslc::ItemTypeName;
use plm_oslc_odata::ItemRow;

use super::{EngineError, Session};

impl Session<'_> {
    /// The item with id `item_id`, or [`EngineError::ItemNotFound`].
    pub async fn validate_item_id(
        &self,
        item_type: &ItemTypeName,
        item_id: &str,
    ) -> Result<ItemRow, EngineError> {
        if item_id.is_empty() {
            return Err(EngineError::item_not_found(item_type, item_id));
        }
        self.source
            .get_item(self.credential, item_type, item_id)
            .await?
            .ok_or_else(|| EngineError::item_not_found(item_type, item_id))
    }

    /// Every item of configuration `config_id`; fails with
    /// [`EngineError::ItemNotFound`] when there are none.
    pub async fn validate_config_id(
        &self,
        item_type: &ItemTypeName,
        config_id: &str,
    ) -> Result<Vec<ItemRow>, EngineError> {
        if config_id.is_empty() {
            return Err(EngineError::item_not_found(item_type, config_id));
        }
        let rows = self
            .source
            .find_by_config_id(self.credential, item_type, config_id)
            .await?;
        if rows.is_empty() {
            return Err(EngineError::item_not_found(item_type, config_id));
        }
        Ok(rows)
    }
}
