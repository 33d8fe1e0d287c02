use super::domain::Lead;

/// Render leads as a CSV document with a stable column order.
pub fn leads_to_csv(leads: &[Lead]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "name",
        "email",
        "phone",
        "business_name",
        "region",
        "modules",
        "situation",
        "score",
        "risk_level",
        "top_risks",
        "created_at",
    ])?;

    for lead in leads {
        let modules = lead
            .modules
            .iter()
            .map(|module| module.0.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        writer.write_record([
            lead.name.as_str(),
            lead.email.as_str(),
            lead.phone.as_str(),
            lead.business_name.as_str(),
            lead.region.as_str(),
            modules.as_str(),
            lead.situation.as_str(),
            lead.score.as_deref().unwrap_or(""),
            lead.risk_level.as_deref().unwrap_or(""),
            lead.top_risks.join(", ").as_str(),
            lead.created_at.to_rfc3339().as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
