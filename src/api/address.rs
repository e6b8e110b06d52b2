use serde::{Deserialize, Serialize};

use crate::database::{Address, NewAddress};
use crate::validation::{Field, Rule, Validate};

const ID_RULES: &[Rule] = &[Rule::Required];
const LINE1_RULES: &[Rule] = &[Rule::Required, Rule::Length { min: 1, max: 100 }];
const LINE2_RULES: &[Rule] = &[Rule::Length { min: 0, max: 100 }];
const PLACE_RULES: &[Rule] = &[Rule::Required, Rule::Length { min: 1, max: 50 }];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAddressRequest {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub country: String,
}

impl Validate for CreateAddressRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("addressLine1", &self.address_line1, LINE1_RULES),
            Field::text("addressLine2", &self.address_line2, LINE2_RULES),
            Field::text("city", &self.city, PLACE_RULES),
            Field::text("country", &self.country, PLACE_RULES),
        ]
    }
}

impl CreateAddressRequest {
    pub fn into_new_address(self, customer_id: i64) -> NewAddress {
        NewAddress {
            customer_id,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            country: self.country,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAddressRequest {
    pub id: i64,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub country: String,
}

impl Validate for UpdateAddressRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::integer("id", self.id, ID_RULES),
            Field::text("addressLine1", &self.address_line1, LINE1_RULES),
            Field::text("addressLine2", &self.address_line2, LINE2_RULES),
            Field::text("city", &self.city, PLACE_RULES),
            Field::text("country", &self.country, PLACE_RULES),
        ]
    }
}

impl UpdateAddressRequest {
    /// Apply the request to a stored address, keeping its owner
    pub fn apply_to(self, stored: &Address) -> Address {
        Address {
            id: stored.id,
            customer_id: stored.customer_id,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            country: self.country,
        }
    }
}

/// Query parameters of `DELETE /customer/address/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteAddressRequest {
    pub id: i64,
}

impl Validate for DeleteAddressRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::integer("id", self.id, ID_RULES)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAddressResponse {
    pub id: i64,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub country: String,
}

impl From<Address> for GetAddressResponse {
    fn from(address: Address) -> Self {
        GetAddressResponse {
            id: address.id,
            address_line1: address.address_line1,
            address_line2: address.address_line2,
            city: address.city,
            country: address.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;

    #[test]
    fn empty_update_fails_on_id_first() {
        let validator = Validator::standard().unwrap();
        let err = validator.validate(&UpdateAddressRequest::default()).unwrap_err();
        assert_eq!(err.field, "id");
        assert_eq!(err.rule, Rule::Required);
    }

    #[test]
    fn second_line_is_optional() {
        let validator = Validator::standard().unwrap();
        let request = CreateAddressRequest {
            address_line1: "ul. Vitosha 1".to_string(),
            address_line2: String::new(),
            city: "Sofia".to_string(),
            country: "Bulgaria".to_string(),
        };
        assert!(validator.validate(&request).is_ok());
    }

    #[test]
    fn update_keeps_stored_owner() {
        let stored = Address {
            id: 2,
            customer_id: 1,
            address_line1: "ul. Vitosha 1".to_string(),
            address_line2: String::new(),
            city: "Sofia".to_string(),
            country: "Bulgaria".to_string(),
        };
        let request = UpdateAddressRequest {
            id: 2,
            address_line1: "bul. Primorski 5".to_string(),
            address_line2: String::new(),
            city: "Varna".to_string(),
            country: "Bulgaria".to_string(),
        };

        let updated = request.apply_to(&stored);
        assert_eq!(updated.customer_id, 1);
        assert_eq!(updated.city, "Varna");
    }
}
