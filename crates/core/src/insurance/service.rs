//! Insurance card service
//!
//! The required-field checks run before any network request; a form with
//! a blank contract id never leaves the process.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitaport_domain::{InsuranceCard, InsuranceForm, InsuranceUpdate, Result, Subscriber};

use crate::store::{QueryCache, QueryKey, Tag};
use crate::validate::required;

use super::ports::InsuranceApi;

/// Insurance card operations over the port and the query cache
pub struct InsuranceService {
    api: Arc<dyn InsuranceApi>,
    cache: Arc<QueryCache>,
}

impl InsuranceService {
    /// Create the service
    #[must_use]
    pub fn new(api: Arc<dyn InsuranceApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    fn list_key() -> QueryKey {
        QueryKey::new("insurance/list")
    }

    /// Cards on file; key `insurance/list`, tag `Insurance`
    pub async fn cards(
        &self,
        cancel: Option<CancellationToken>,
    ) -> Result<Arc<Vec<InsuranceCard>>> {
        let api = self.api.clone();
        self.cache
            .fetch(Self::list_key(), &[Tag::Insurance], move || async move {
                api.cards(cancel).await
            })
            .await
    }

    /// Create a card
    ///
    /// Invalidates `Insurance` and `User` (the profile embeds the card
    /// list).
    pub async fn create(
        &self,
        form: InsuranceForm,
        cancel: Option<CancellationToken>,
    ) -> Result<InsuranceCard> {
        validate_card_fields(
            &form.insurance_name,
            &form.contract_id,
            &form.group_number,
            &form.patient_relationship,
            &form.subscriber,
        )?;

        let card = self.api.create(&form, cancel).await?;
        self.cache.invalidate_tags(&[Tag::Insurance, Tag::User]).await;
        tracing::info!(card_id = %card.id, "insurance card created");
        Ok(card)
    }

    /// Update a card; invalidates `Insurance` and `User`
    pub async fn update(
        &self,
        id: &str,
        update: InsuranceUpdate,
        cancel: Option<CancellationToken>,
    ) -> Result<InsuranceCard> {
        validate_card_fields(
            &update.insurance_name,
            &update.contract_id,
            &update.group_number,
            &update.patient_relationship,
            &update.subscriber,
        )?;

        let card = self.api.update(id, &update, cancel).await?;
        self.cache.invalidate_tags(&[Tag::Insurance, Tag::User]).await;
        Ok(card)
    }

    /// Delete a card; invalidates `Insurance` and `User`
    pub async fn delete(&self, id: &str, cancel: Option<CancellationToken>) -> Result<()> {
        self.api.delete(id, cancel).await?;
        self.cache.invalidate_tags(&[Tag::Insurance, Tag::User]).await;
        tracing::info!(card_id = id, "insurance card deleted");
        Ok(())
    }
}

fn validate_card_fields(
    insurance_name: &str,
    contract_id: &str,
    group_number: &str,
    patient_relationship: &str,
    subscriber: &Subscriber,
) -> Result<()> {
    required("insuranceName", insurance_name)?;
    required("contractId", contract_id)?;
    required("groupNumber", group_number)?;
    required("patientRelationship", patient_relationship)?;
    required("subscriber.firstName", &subscriber.first_name)?;
    required("subscriber.lastName", &subscriber.last_name)?;
    Ok(())
}
