/// Contact properties requested from the CRM search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    FirstName,
    LastName,
    RawEmail,
    Country,
    Phone,
    CreateDate,
    Industry,
    Address,
    ExternalId,
    Consent,
}

impl Attribute {
    pub const fn as_str(self) -> &'static str {
        match self {
            Attribute::FirstName => "firstname",
            Attribute::LastName => "lastname",
            Attribute::RawEmail => "raw_email",
            Attribute::Country => "country",
            Attribute::Phone => "phone",
            Attribute::CreateDate => "technical_test___create_date",
            Attribute::Industry => "industry",
            Attribute::Address => "address",
            Attribute::ExternalId => "hs_object_id",
            Attribute::Consent => "allowed_to_collect",
        }
    }

    pub const fn all() -> &'static [Attribute] {
        &[
            Attribute::FirstName,
            Attribute::LastName,
            Attribute::RawEmail,
            Attribute::Country,
            Attribute::Phone,
            Attribute::CreateDate,
            Attribute::Industry,
            Attribute::Address,
            Attribute::ExternalId,
            Attribute::Consent,
        ]
    }
}
