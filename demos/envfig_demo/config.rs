use confique::Config;
use envfig::{EnvConfig, FieldMut};
use serde::Serialize;

/// Settings for the demo tool.
#[derive(Config, Serialize, Debug)]
pub struct DemoConfig {
    /// Flits per gazeebop.
    #[config(env = "FPG", default = 0)]
    pub flits_per_gazeebop: i32,

    /// Conversion rate applied to every gazeebop.
    #[config(env = "CONVERSION_RATE", default = 2.5)]
    pub conversion_rate: f32,

    /// Whether the gazeebops are rundable.
    #[config(env = "RUNDABLE", default = false)]
    pub is_rundable: bool,

    /// Access key for the gazeebop service.
    #[config(env = "ACCESS_KEY")]
    pub access_key: String,

    /// Last four digits of the operator's SSN.
    #[config(env = "LAST4_SSN")]
    pub last4_ssn: String,

    /// Not bound to any variable, so never listed or edited.
    #[config(default = "local")]
    pub not_an_env: String,
}

impl EnvConfig for DemoConfig {
    const SECRETS: &'static [(&'static str, &'static str)] =
        &[("access_key", "hide"), ("last4_ssn", "mask")];

    fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>> {
        Some(match field {
            "flits_per_gazeebop" => (&mut self.flits_per_gazeebop).into(),
            "conversion_rate" => (&mut self.conversion_rate).into(),
            "is_rundable" => (&mut self.is_rundable).into(),
            "access_key" => (&mut self.access_key).into(),
            "last4_ssn" => (&mut self.last4_ssn).into(),
            _ => return None,
        })
    }
}
