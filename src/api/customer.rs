use serde::{Deserialize, Serialize};

use crate::database::{Customer, NewCustomer};
use crate::validation::{Field, Rule, Validate, EMAIL, PHONE_NUMBER};

const NAME_RULES: &[Rule] = &[Rule::Required, Rule::Length { min: 2, max: 20 }];
const PHONE_NUMBER_RULES: &[Rule] = &[Rule::Required, Rule::Format(PHONE_NUMBER)];
const EMAIL_RULES: &[Rule] = &[Rule::Required, Rule::Format(EMAIL)];
const PASSWORD_RULES: &[Rule] = &[Rule::Required, Rule::Length { min: 2, max: 72 }];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

impl Validate for CreateCustomerRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("firstName", &self.first_name, NAME_RULES),
            Field::text("lastName", &self.last_name, NAME_RULES),
            Field::text("phoneNumber", &self.phone_number, PHONE_NUMBER_RULES),
            Field::text("email", &self.email, EMAIL_RULES),
            Field::text("password", &self.password, PASSWORD_RULES),
        ]
    }
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(request: CreateCustomerRequest) -> Self {
        NewCustomer {
            first_name: request.first_name,
            last_name: request.last_name,
            phone_number: request.phone_number,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

impl Validate for UpdateCustomerRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("firstName", &self.first_name, NAME_RULES),
            Field::text("lastName", &self.last_name, NAME_RULES),
            Field::text("phoneNumber", &self.phone_number, PHONE_NUMBER_RULES),
            Field::text("email", &self.email, EMAIL_RULES),
            Field::text("password", &self.password, PASSWORD_RULES),
        ]
    }
}

impl UpdateCustomerRequest {
    /// Apply the request to the stored customer with the given id
    pub fn into_customer(self, id: i64) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginCustomerRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginCustomerRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("email", &self.email, EMAIL_RULES),
            Field::text("password", &self.password, PASSWORD_RULES),
        ]
    }
}

/// Public view of a customer; the password never leaves the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

impl From<Customer> for GetCustomerResponse {
    fn from(customer: Customer) -> Self {
        GetCustomerResponse {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            phone_number: customer.phone_number,
            email: customer.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;

    fn peter() -> CreateCustomerRequest {
        CreateCustomerRequest {
            first_name: "Peter".to_string(),
            last_name: "Smith".to_string(),
            phone_number: "+359 88 576 5981".to_string(),
            email: "petesmith@gmail.com".to_string(),
            password: "firefirefire".to_string(),
        }
    }

    #[test]
    fn valid_create_request_passes() {
        let validator = Validator::standard().unwrap();
        assert!(validator.validate(&peter()).is_ok());
    }

    #[test]
    fn bad_phone_number_is_rejected() {
        let validator = Validator::standard().unwrap();
        let request = CreateCustomerRequest { phone_number: "abc".to_string(), ..peter() };

        let err = validator.validate(&request).unwrap_err();
        assert_eq!(err.field, "phoneNumber");
        assert_eq!(err.rule, Rule::Format(PHONE_NUMBER));
    }

    #[test]
    fn missing_fields_decode_empty_and_fail_required() {
        let validator = Validator::standard().unwrap();
        let request: LoginCustomerRequest =
            serde_json::from_str(r#"{"password": "firefirefire"}"#).unwrap();

        let err = validator.validate(&request).unwrap_err();
        assert_eq!(err.field, "email");
        assert_eq!(err.rule, Rule::Required);
    }

    #[test]
    fn response_omits_password() {
        let customer = NewCustomer::from(peter()).with_id(3);
        let value = serde_json::to_value(GetCustomerResponse::from(customer)).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["firstName"], "Peter");
        assert!(value.get("password").is_none());
    }
}
