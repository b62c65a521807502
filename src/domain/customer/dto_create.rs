use super::Customer;

/// Input for creating a customer. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerDto {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl From<CreateCustomerDto> for Customer {
    fn from(dto: CreateCustomerDto) -> Self {
        Customer::create(dto.name, dto.email, dto.address)
    }
}
