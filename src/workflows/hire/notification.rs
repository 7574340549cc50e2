use async_trait::async_trait;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use super::domain::{DriverHireRequest, HirePayload, QuickHireRequest};
use super::rates::format_naira;

const TEMPLATE_NAME: &str = "driver_request";

const STANDARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; background: #000000; color: #fef08a; padding: 24px;">
    <h2 style="color: #facc15;">New Driver Hire Request</h2>
    <p>{{payload.requester_name}} &lt;{{payload.requester_email}}&gt; submitted the {{payload.form_label}}.</p>
    {{#each payload.sections}}
    <h3 style="color: #facc15; margin-top: 24px;">{{title}}</h3>
    <table cellpadding="6" style="border-collapse: collapse;">
      {{#each fields}}
      <tr>
        <td style="font-weight: bold; vertical-align: top;">{{label}}</td>
        <td>{{value}}</td>
      </tr>
      {{/each}}
    </table>
    {{/each}}
    <p style="margin-top: 32px; font-size: 12px;">Sent from <a href="{{site_url}}" style="color: #facc15;">{{site_url}}</a></p>
  </body>
</html>
"#;

/// Summary of a submitted request, shaped for the staff e-mail. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub form_label: &'static str,
    pub requester_name: String,
    pub requester_email: String,
    pub sections: Vec<NotificationSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationSection {
    pub title: &'static str,
    pub fields: Vec<NotificationField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationField {
    pub label: &'static str,
    pub value: String,
}

fn field(label: &'static str, value: impl Into<String>) -> NotificationField {
    NotificationField {
        label,
        value: value.into(),
    }
}

impl From<&HirePayload> for NotificationPayload {
    fn from(payload: &HirePayload) -> Self {
        let sections = match payload {
            HirePayload::Wizard(request) => wizard_sections(request),
            HirePayload::Quick(request) => quick_sections(request),
        };
        let form_label = match payload {
            HirePayload::Wizard(_) => "driver hire wizard",
            HirePayload::Quick(_) => "quick request form",
        };

        Self {
            form_label,
            requester_name: payload.requester_name().to_string(),
            requester_email: payload.requester_email().to_string(),
            sections,
        }
    }
}

fn wizard_sections(request: &DriverHireRequest) -> Vec<NotificationSection> {
    let personal = &request.personal_details;
    let project = &request.project_details;
    let vehicle = &request.vehicle_details;
    let address = &request.address_information;

    let salary = project
        .salary_package
        .trim()
        .parse::<u32>()
        .map(format_naira)
        .unwrap_or_else(|_| project.salary_package.clone());

    vec![
        NotificationSection {
            title: "Personal Details",
            fields: vec![
                field("Full Name", personal.full_name.as_str()),
                field("Email", personal.email.as_str()),
                field("Phone", personal.phone.as_str()),
                field("Married", personal.marital_status.as_str()),
                field("Preferred Driver Location", personal.location.as_str()),
            ],
        },
        NotificationSection {
            title: "Project Details",
            fields: vec![
                field("Driver Type", project.driver_type.label()),
                field("Contract Duration", project.contract_duration.as_str()),
                field("Work Schedule", project.work_schedule.label()),
                field("Salary Package", salary),
                field("Accommodation", project.accommodation.as_str()),
                field("Duties", project.duties_description.as_str()),
                field("Resumption", project.resumption_date_time.as_str()),
                field("Closing Time", project.closing_time.as_str()),
            ],
        },
        NotificationSection {
            title: "Vehicle Details",
            fields: vec![
                field("Provides Vehicle", vehicle.provides_vehicle.as_str()),
                field("Vehicle Type", vehicle.vehicle_type.as_str()),
                field("Transmission", vehicle.vehicle_transmission.as_str()),
                field("Insurance", vehicle.vehicle_insurance.label()),
                field("Brand", vehicle.vehicle_brand.as_str()),
                field("Model", vehicle.vehicle_model.as_str()),
                field("Year", vehicle.vehicle_year.as_str()),
            ],
        },
        NotificationSection {
            title: "Address Information",
            fields: vec![
                field("Home Address", address.home_address.as_str()),
                field("Office Address", address.office_address.as_str()),
                field("Pickup Locations", address.pickup_locations.as_str()),
            ],
        },
    ]
}

fn quick_sections(request: &QuickHireRequest) -> Vec<NotificationSection> {
    vec![NotificationSection {
        title: "Request",
        fields: vec![
            field("Full Name", request.full_name.as_str()),
            field("Email", request.email.as_str()),
            field("Phone", request.phone.as_str()),
            field("Preferred Location", request.location.as_str()),
            field("Request Details", request.request_details.as_str()),
        ],
    }]
}

/// Rendered e-mail body ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("notification template failed: {0}")]
    Template(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
    #[error("notification provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Template rendering plus e-mail dispatch.
#[async_trait]
pub trait NotificationService: Send + Sync {
    fn render(&self, payload: &NotificationPayload) -> Result<NotificationContent, RenderError>;

    async fn send(
        &self,
        content: &NotificationContent,
        recipient: &str,
        subject: &str,
    ) -> Result<(), DispatchError>;
}

/// Handlebars-backed staff e-mail template. Field values are HTML-escaped and
/// absent values render as empty strings.
pub struct EmailTemplate {
    registry: Handlebars<'static>,
    site_url: String,
}

impl EmailTemplate {
    pub fn standard(site_url: impl Into<String>) -> Result<Self, handlebars::TemplateError> {
        Self::from_source(STANDARD_TEMPLATE, site_url)
    }

    pub fn from_source(
        source: &str,
        site_url: impl Into<String>,
    ) -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self {
            registry,
            site_url: site_url.into(),
        })
    }

    pub fn render(&self, payload: &NotificationPayload) -> Result<NotificationContent, RenderError> {
        let data = json!({
            "payload": payload,
            "site_url": self.site_url,
        });
        let html = self
            .registry
            .render(TEMPLATE_NAME, &data)
            .map_err(|err| RenderError::Template(err.to_string()))?;
        Ok(NotificationContent { html })
    }
}

impl std::fmt::Debug for EmailTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailTemplate")
            .field("site_url", &self.site_url)
            .finish_non_exhaustive()
    }
}
