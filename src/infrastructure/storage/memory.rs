//! In-memory customer store

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{Customer, CustomerId, CustomerRepository, DomainError, DomainResult};

/// In-memory store for development and testing.
///
/// Enforces the same email unique constraint as the `customers` table:
/// `email_index` maps each email to its holder and is claimed through the
/// `DashMap` entry API, so two concurrent saves cannot both take an email.
pub struct InMemoryCustomerRepository {
    customers: DashMap<CustomerId, Customer>,
    email_index: DashMap<String, CustomerId>,
    id_counter: AtomicI64,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            email_index: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    fn next_id(&self, requested: Option<CustomerId>) -> CustomerId {
        match requested {
            Some(id) => {
                self.id_counter.fetch_max(id + 1, Ordering::SeqCst);
                id
            }
            None => self.id_counter.fetch_add(1, Ordering::SeqCst),
        }
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let mut customers: Vec<Customer> =
            self.customers.iter().map(|c| c.value().clone()).collect();
        customers.sort_by_key(|c| c.id);
        Ok(customers)
    }

    async fn find_by_id(&self, id: CustomerId) -> DomainResult<Option<Customer>> {
        Ok(self.customers.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>> {
        let Some(id) = self.email_index.get(email).map(|holder| *holder) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn exists_by_id(&self, id: CustomerId) -> DomainResult<bool> {
        Ok(self.customers.contains_key(&id))
    }

    async fn save(&self, customer: Customer) -> DomainResult<Customer> {
        let id = self.next_id(customer.id);

        match self.email_index.entry(customer.email.clone()) {
            Entry::Occupied(holder) if *holder.get() != id => {
                return Err(DomainError::email_unavailable(&customer.email));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let stored = Customer {
            id: Some(id),
            ..customer
        };

        if let Some(previous) = self.customers.insert(id, stored.clone()) {
            if previous.email != stored.email {
                self.email_index
                    .remove_if(&previous.email, |_, holder| *holder == id);
            }
        }

        Ok(stored)
    }

    async fn delete_by_id(&self, id: CustomerId) -> DomainResult<()> {
        if let Some((_, removed)) = self.customers.remove(&id) {
            self.email_index
                .remove_if(&removed.email, |_, holder| *holder == id);
        }
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        self.customers.clear();
        self.email_index.clear();
        Ok(())
    }
}
