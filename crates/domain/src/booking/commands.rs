//! Booking commands.

use booking_store::SlotId;

use crate::error::DomainError;
use crate::promo::AppliedPromo;

/// Customer contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// Creates a new contact.
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Returns the trimmed contact, or the first field that is missing or
    /// holds a control character.
    pub fn validated(&self) -> Result<Contact, DomainError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();

        if !is_printable(name) {
            return Err(DomainError::InvalidContact { field: "name" });
        }
        if !is_printable(email) || !email.contains('@') {
            return Err(DomainError::InvalidContact { field: "email" });
        }
        if !is_printable(phone) {
            return Err(DomainError::InvalidContact { field: "phone" });
        }

        Ok(Contact::new(name, email, phone))
    }
}

fn is_printable(field: &str) -> bool {
    !field.is_empty() && !field.chars().any(char::is_control)
}

/// Command to book guests onto a slot.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    /// The slot to book.
    pub slot_id: SlotId,

    /// Number of guests, at least one.
    pub guest_count: u32,

    /// Who is booking.
    pub contact: Contact,

    /// Promo applied during checkout, if any.
    pub promo: Option<AppliedPromo>,
}

impl CreateBooking {
    /// Creates a new CreateBooking command without a promo.
    pub fn new(slot_id: SlotId, guest_count: u32, contact: Contact) -> Self {
        Self {
            slot_id,
            guest_count,
            contact,
            promo: None,
        }
    }

    /// Attaches an applied promo.
    pub fn with_promo(mut self, promo: AppliedPromo) -> Self {
        self.promo = Some(promo);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_is_trimmed() {
        let contact = Contact::new("  Priya ", " priya@example.com", "98765 ")
            .validated()
            .unwrap();
        assert_eq!(contact, Contact::new("Priya", "priya@example.com", "98765"));
    }

    #[test]
    fn contact_reports_first_missing_field() {
        let cases = [
            (Contact::new("", "a@b.c", "1"), "name"),
            (Contact::new("A", "not-an-email", "1"), "email"),
            (Contact::new("A", "a@b.c", "  "), "phone"),
            (Contact::new("Mee\0ra", "a@b.c", "1"), "name"),
            (Contact::new("A", "a@b\n.c", "1"), "email"),
            (Contact::new("A", "a@\u{7}b.c", "1"), "email"),
            (Contact::new("A", "a@b.c", "98\t765"), "phone"),
        ];
        for (contact, expected) in cases {
            match contact.validated() {
                Err(DomainError::InvalidContact { field }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }
}
