//! In-memory CRM fakes shared by the handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::donation::Donation;
use crate::domain::foundation::CrmError;
use crate::domain::membership::Membership;
use crate::domain::person::{NormalizedEmail, Person, PersonFields, PersonId};
use crate::ports::{DonationStore, MembershipStore, PersonDirectory};

/// Person directory backed by a `Vec`, with scriptable create failures.
#[derive(Default)]
pub(crate) struct FakeDirectory {
    people: Mutex<Vec<Person>>,
    failing_creates: Mutex<u32>,
    next_id: Mutex<i64>,
    pub(crate) creates: Mutex<Vec<PersonFields>>,
    pub(crate) updates: Mutex<Vec<(PersonId, PersonFields)>>,
}

impl FakeDirectory {
    pub(crate) fn with_person(self, person: Person) -> Self {
        self.people.lock().unwrap().push(person);
        self
    }

    /// Makes the next `count` create calls fail as an email conflict.
    pub(crate) fn failing_creates(self, count: u32) -> Self {
        *self.failing_creates.lock().unwrap() = count;
        self
    }

    pub(crate) fn create_count(&self) -> usize {
        self.creates.lock().unwrap().len()
    }

    pub(crate) fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl PersonDirectory for FakeDirectory {
    async fn match_by_email(&self, email: &NormalizedEmail) -> Result<Option<Person>, CrmError> {
        Ok(self
            .people
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.email.as_deref() == Some(email.as_str()))
            .cloned())
    }

    async fn create_person(&self, fields: &PersonFields) -> Result<Person, CrmError> {
        self.creates.lock().unwrap().push(fields.clone());

        let mut failing = self.failing_creates.lock().unwrap();
        if *failing > 0 {
            *failing -= 1;
            return Err(CrmError::Validation("email is taken".to_string()));
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let person = Person {
            id: PersonId::new(*next_id),
            email: fields.email.clone(),
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            tags: fields.tags.clone(),
        };
        self.people.lock().unwrap().push(person.clone());
        Ok(person)
    }

    async fn update_person(
        &self,
        id: PersonId,
        fields: &PersonFields,
    ) -> Result<Person, CrmError> {
        self.updates.lock().unwrap().push((id, fields.clone()));
        let people = self.people.lock().unwrap();
        people
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CrmError::Service(format!("no person {}", id)))
    }
}

/// Membership store backed by a `Vec`.
#[derive(Default)]
pub(crate) struct FakeMembershipStore {
    memberships: Mutex<Vec<Membership>>,
    pub(crate) created: Mutex<Vec<(PersonId, Membership)>>,
    pub(crate) updated: Mutex<Vec<(PersonId, Membership)>>,
}

impl FakeMembershipStore {
    pub(crate) fn with_membership(self, membership: Membership) -> Self {
        self.memberships.lock().unwrap().push(membership);
        self
    }

    pub(crate) fn write_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updated.lock().unwrap().len()
    }
}

#[async_trait]
impl MembershipStore for FakeMembershipStore {
    async fn list_memberships(
        &self,
        _person: PersonId,
        _page_size: u32,
    ) -> Result<Vec<Membership>, CrmError> {
        Ok(self.memberships.lock().unwrap().clone())
    }

    async fn create_membership(
        &self,
        person: PersonId,
        membership: &Membership,
    ) -> Result<Membership, CrmError> {
        self.created.lock().unwrap().push((person, membership.clone()));
        Ok(membership.clone())
    }

    async fn update_membership(
        &self,
        person: PersonId,
        membership: &Membership,
    ) -> Result<Membership, CrmError> {
        self.updated.lock().unwrap().push((person, membership.clone()));
        Ok(membership.clone())
    }
}

/// Donation store that records what was written.
#[derive(Default)]
pub(crate) struct FakeDonationStore {
    pub(crate) donations: Mutex<Vec<Donation>>,
}

#[async_trait]
impl DonationStore for FakeDonationStore {
    async fn create_donation(&self, donation: &Donation) -> Result<(), CrmError> {
        self.donations.lock().unwrap().push(donation.clone());
        Ok(())
    }
}

pub(crate) fn existing_person(id: i64, email: &str) -> Person {
    Person {
        id: PersonId::new(id),
        email: Some(email.to_string()),
        first_name: Some("Jo".to_string()),
        last_name: Some("Citizen".to_string()),
        tags: vec!["member".to_string()],
    }
}
