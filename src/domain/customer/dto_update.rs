/// Partial update: `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCustomerDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

