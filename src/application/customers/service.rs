//! Customer service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here. The store is only
//! asked to read and write; it never decides whether an operation is
//! allowed (apart from the database unique index on email, which backs up
//! the check performed below).

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    CreateCustomerDto, Customer, CustomerId, CustomerRepository, DomainError, DomainResult,
    UpdateCustomerDto,
};

/// Customer use cases over any store. The HTTP layer uses
/// `CustomerService<dyn CustomerRepository>`.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_customers(&self) -> DomainResult<Vec<Customer>> {
        self.repo.find_all().await
    }

    pub async fn get_customer_by_id(&self, id: CustomerId) -> DomainResult<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a customer unless the email is already registered.
    pub async fn create_customer(&self, dto: CreateCustomerDto) -> DomainResult<Customer> {
        if self.repo.find_by_email(&dto.email).await?.is_some() {
            warn!(email = %dto.email, "Customer creation rejected: email taken");
            return Err(DomainError::email_unavailable(&dto.email));
        }

        let customer = self.repo.save(Customer::from(dto)).await?;

        info!(customer_id = ?customer.id, email = %customer.email, "Customer created");
        Ok(customer)
    }

    /// Apply the supplied fields to the customer and persist it.
    ///
    /// Changes are staged on a copy and written with a single `save`; if the
    /// email check fails nothing is written, including staged name or
    /// address changes.
    pub async fn update_customer(
        &self,
        id: CustomerId,
        dto: UpdateCustomerDto,
    ) -> DomainResult<Customer> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(id))?;

        let mut updated = current.clone();

        if let Some(name) = dto.name {
            if name != updated.name {
                updated.name = name;
            }
        }

        if let Some(email) = dto.email {
            if email != updated.email {
                if let Some(holder) = self.repo.find_by_email(&email).await? {
                    if holder.id != current.id {
                        warn!(
                            customer_id = id,
                            email = %email,
                            "Customer update rejected: email taken"
                        );
                        return Err(DomainError::email_unavailable_to_update(&email));
                    }
                }
                updated.email = email;
            }
        }

        if let Some(address) = dto.address {
            if address != updated.address {
                updated.address = address;
            }
        }

        if updated == current {
            debug!(customer_id = id, "Customer update is a no-op");
            return Ok(current);
        }

        let email = updated.email.clone();
        let saved = self.repo.save(updated).await.map_err(|e| match e {
            // Lost a race against another writer; report it as an update conflict
            DomainError::EmailUnavailable(_) => DomainError::email_unavailable_to_update(&email),
            other => other,
        })?;

        info!(customer_id = id, "Customer updated");
        Ok(saved)
    }

    pub async fn delete_customer(&self, id: CustomerId) -> DomainResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(DomainError::customer_not_exists(id));
        }

        self.repo.delete_by_id(id).await?;

        info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::infrastructure::storage::InMemoryCustomerRepository;

    /// Canned answers for reads, records every write.
    #[derive(Default)]
    struct StubRepository {
        by_id: Option<Customer>,
        by_email: Option<Customer>,
        exists: bool,
        /// Returned by `save` instead of storing
        save_error: Option<DomainError>,
        find_all_calls: AtomicUsize,
        saved: Mutex<Vec<Customer>>,
        deleted: Mutex<Vec<CustomerId>>,
    }

    impl StubRepository {
        fn with_customer(customer: Customer) -> Self {
            Self {
                by_id: Some(customer),
                ..Default::default()
            }
        }

        fn saved(&self) -> Vec<Customer> {
            self.saved.lock().unwrap().clone()
        }

        fn deleted(&self) -> Vec<CustomerId> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CustomerRepository for StubRepository {
        async fn find_all(&self) -> DomainResult<Vec<Customer>> {
            self.find_all_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: CustomerId) -> DomainResult<Option<Customer>> {
            Ok(self.by_id.clone())
        }

        async fn find_by_email(&self, _email: &str) -> DomainResult<Option<Customer>> {
            Ok(self.by_email.clone())
        }

        async fn exists_by_id(&self, _id: CustomerId) -> DomainResult<bool> {
            Ok(self.exists)
        }

        async fn save(&self, customer: Customer) -> DomainResult<Customer> {
            if let Some(err) = &self.save_error {
                return Err(err.clone());
            }
            self.saved.lock().unwrap().push(customer.clone());
            Ok(customer)
        }

        async fn delete_by_id(&self, id: CustomerId) -> DomainResult<()> {
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }

        async fn delete_all(&self) -> DomainResult<()> {
            Ok(())
        }
    }

    fn leon() -> Customer {
        Customer::new(5, "leon", "leon@gmail.com", "US")
    }

    fn service(repo: &Arc<StubRepository>) -> CustomerService<StubRepository> {
        CustomerService::new(Arc::clone(repo))
    }

    fn create_request() -> CreateCustomerDto {
        CreateCustomerDto {
            name: "leon".into(),
            email: "leon@gmail.com".into(),
            address: "US".into(),
        }
    }

    #[tokio::test]
    async fn list_reads_all_from_store() {
        let repo = Arc::new(StubRepository::default());
        service(&repo).list_customers().await.unwrap();
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_by_id_returns_customer() {
        let repo = Arc::new(StubRepository::with_customer(leon()));
        let customer = service(&repo).get_customer_by_id(5).await.unwrap();
        assert_eq!(customer, leon());
    }

    #[tokio::test]
    async fn get_by_id_unknown_is_not_found() {
        let repo = Arc::new(StubRepository::default());
        let err = service(&repo).get_customer_by_id(5).await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("Customer with id 5 doesn't found".into()));
    }

    #[tokio::test]
    async fn create_saves_request_fields() {
        let repo = Arc::new(StubRepository::default());
        service(&repo).create_customer(create_request()).await.unwrap();

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, None);
        assert_eq!(saved[0].name, "leon");
        assert_eq!(saved[0].email, "leon@gmail.com");
        assert_eq!(saved[0].address, "US");
    }

    #[tokio::test]
    async fn create_with_taken_email_fails_without_saving() {
        let repo = Arc::new(StubRepository {
            by_email: Some(Customer::create("other", "leon@gmail.com", "UK")),
            ..Default::default()
        });

        let err = service(&repo).create_customer(create_request()).await.unwrap_err();

        assert!(matches!(err, DomainError::EmailUnavailable(_)));
        assert_eq!(err.to_string(), "The email leon@gmail.com unavailable.");
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let repo = Arc::new(StubRepository::default());
        let dto = UpdateCustomerDto {
            name: Some("leon".into()),
            email: Some("leon@gmail.com".into()),
            address: Some("US".into()),
        };

        let err = service(&repo).update_customer(5, dto).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "Customer with id 5 doesn't found");
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn update_only_name() {
        let repo = Arc::new(StubRepository::with_customer(leon()));
        let dto = UpdateCustomerDto {
            name: Some("leon mark".into()),
            ..Default::default()
        };

        let result = service(&repo).update_customer(5, dto).await.unwrap();

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], Customer::new(5, "leon mark", "leon@gmail.com", "US"));
        assert_eq!(result, saved[0]);
    }

    #[tokio::test]
    async fn update_only_email() {
        let repo = Arc::new(StubRepository::with_customer(leon()));
        let dto = UpdateCustomerDto {
            email: Some("leonaldo@gmail.com".into()),
            ..Default::default()
        };

        service(&repo).update_customer(5, dto).await.unwrap();

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "leon");
        assert_eq!(saved[0].email, "leonaldo@gmail.com");
        assert_eq!(saved[0].address, "US");
    }

    #[tokio::test]
    async fn update_only_address() {
        let repo = Arc::new(StubRepository::with_customer(leon()));
        let dto = UpdateCustomerDto {
            address: Some("UK".into()),
            ..Default::default()
        };

        service(&repo).update_customer(5, dto).await.unwrap();

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "leon");
        assert_eq!(saved[0].email, "leon@gmail.com");
        assert_eq!(saved[0].address, "UK");
    }

    #[tokio::test]
    async fn update_all_fields() {
        let repo = Arc::new(StubRepository::with_customer(leon()));
        let dto = UpdateCustomerDto {
            name: Some("leonaldo".into()),
            email: Some("leonaldo@gmail.com".into()),
            address: Some("UK".into()),
        };

        service(&repo).update_customer(5, dto).await.unwrap();

        assert_eq!(
            repo.saved(),
            vec![Customer::new(5, "leonaldo", "leonaldo@gmail.com", "UK")]
        );
    }

    #[tokio::test]
    async fn update_with_taken_email_fails_without_saving() {
        let repo = Arc::new(StubRepository {
            by_id: Some(leon()),
            by_email: Some(Customer::create("someone", "leonaldo@gmail.com", "FR")),
            ..Default::default()
        });
        let dto = UpdateCustomerDto {
            name: Some("leon mark".into()),
            email: Some("leonaldo@gmail.com".into()),
            address: Some("UK".into()),
        };

        let err = service(&repo).update_customer(5, dto).await.unwrap_err();

        assert!(matches!(err, DomainError::EmailUnavailable(_)));
        assert_eq!(
            err.to_string(),
            "The email \"leonaldo@gmail.com\" unavailable to update"
        );
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn update_with_unchanged_email_skips_lookup() {
        // The stub would report the email as taken; an unchanged email must
        // never be checked against the store.
        let repo = Arc::new(StubRepository {
            by_id: Some(leon()),
            by_email: Some(Customer::create("someone", "leon@gmail.com", "FR")),
            ..Default::default()
        });
        let dto = UpdateCustomerDto {
            email: Some("leon@gmail.com".into()),
            address: Some("UK".into()),
            ..Default::default()
        };

        let result = service(&repo).update_customer(5, dto).await.unwrap();
        assert_eq!(result.address, "UK");
        assert_eq!(repo.saved().len(), 1);
    }

    #[tokio::test]
    async fn update_losing_email_race_reports_update_conflict() {
        // The pre-check sees the email as free, the store then rejects it
        let repo = Arc::new(StubRepository {
            by_id: Some(leon()),
            save_error: Some(DomainError::email_unavailable("leonaldo@gmail.com")),
            ..Default::default()
        });
        let dto = UpdateCustomerDto {
            email: Some("leonaldo@gmail.com".into()),
            ..Default::default()
        };

        let err = service(&repo).update_customer(5, dto).await.unwrap_err();

        assert_eq!(
            err,
            DomainError::EmailUnavailable(
                "The email \"leonaldo@gmail.com\" unavailable to update".into()
            )
        );
    }

    #[tokio::test]
    async fn update_storage_failure_passes_through() {
        let repo = Arc::new(StubRepository {
            by_id: Some(leon()),
            save_error: Some(DomainError::Storage("disk I/O error".into())),
            ..Default::default()
        });
        let dto = UpdateCustomerDto {
            address: Some("UK".into()),
            ..Default::default()
        };

        let err = service(&repo).update_customer(5, dto).await.unwrap_err();

        assert_eq!(err, DomainError::Storage("disk I/O error".into()));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn update_without_changes_does_not_save() {
        let repo = Arc::new(StubRepository::with_customer(leon()));
        let dto = UpdateCustomerDto {
            name: Some("leon".into()),
            ..Default::default()
        };

        let result = service(&repo).update_customer(5, dto).await.unwrap();

        assert_eq!(result, leon());
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let repo = Arc::new(StubRepository::default());

        let err = service(&repo).delete_customer(5).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "Customer with id 5 doesn't exist.");
        assert!(repo.deleted().is_empty());
    }

    #[tokio::test]
    async fn delete_existing_customer() {
        let repo = Arc::new(StubRepository {
            exists: true,
            ..Default::default()
        });

        service(&repo).delete_customer(5).await.unwrap();

        assert_eq!(repo.deleted(), vec![5]);
    }

    // ── Against a real store ────────────────────────────────────

    #[tokio::test]
    async fn create_into_empty_store() {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        let service = CustomerService::new(Arc::clone(&repo));

        let created = service.create_customer(create_request()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
        assert!(created.id.is_some());
        assert_eq!(
            (all[0].name.as_str(), all[0].email.as_str(), all[0].address.as_str()),
            ("leon", "leon@gmail.com", "US")
        );
    }

    #[tokio::test]
    async fn failed_email_update_leaves_store_untouched() {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        let service = CustomerService::new(Arc::clone(&repo));

        let target = service.create_customer(create_request()).await.unwrap();
        service
            .create_customer(CreateCustomerDto {
                name: "mark".into(),
                email: "mark@gmail.com".into(),
                address: "UK".into(),
            })
            .await
            .unwrap();
        let before = repo.find_all().await.unwrap();

        let target_id = target.id.unwrap();
        let err = service
            .update_customer(
                target_id,
                UpdateCustomerDto {
                    name: Some("renamed".into()),
                    email: Some("mark@gmail.com".into()),
                    address: Some("DE".into()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::EmailUnavailable(_)));
        assert_eq!(repo.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn emails_stay_unique_across_operations() {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        let service = CustomerService::new(Arc::clone(&repo));

        let emails = ["a@x.io", "b@x.io", "c@x.io", "a@x.io", "b@x.io"];
        for (i, email) in emails.iter().enumerate() {
            let _ = service
                .create_customer(CreateCustomerDto {
                    name: format!("customer {i}"),
                    email: email.to_string(),
                    address: "US".into(),
                })
                .await;
        }

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 3);

        // Swap attempts between existing customers must all fail
        for customer in &all {
            for other in &all {
                if customer.id == other.id {
                    continue;
                }
                let result = service
                    .update_customer(
                        customer.id.unwrap(),
                        UpdateCustomerDto {
                            email: Some(other.email.clone()),
                            ..Default::default()
                        },
                    )
                    .await;
                assert!(matches!(result, Err(DomainError::EmailUnavailable(_))));
            }
        }

        let mut emails: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.email)
            .collect();
        let total = emails.len();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), total);
    }
}
