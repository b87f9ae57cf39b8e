use crate::errors::{GatelinkError, Result};
use crate::storage::models::{FieldMap, Link, Submission};
use migration::entities::{link, submission};

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        code: model.code,
        owner: model.owner,
        destination: model.destination,
        label: model.label,
        created_at: model.created_at,
    }
}

pub fn link_to_active_model(link: &Link) -> link::ActiveModel {
    use sea_orm::ActiveValue::Set;

    link::ActiveModel {
        code: Set(link.code.clone()),
        owner: Set(link.owner.clone()),
        destination: Set(link.destination.clone()),
        label: Set(link.label.clone()),
        created_at: Set(link.created_at),
    }
}

/// Field maps travel as JSON text. A row whose payload no longer parses is a
/// store-level fault, not a missing record, so it surfaces as an error.
pub fn model_to_submission(model: submission::Model) -> Result<Submission> {
    let fields: FieldMap = serde_json::from_str(&model.fields_json).map_err(|e| {
        GatelinkError::serialization(format!(
            "submission '{}' has unreadable fields: {}",
            model.id, e
        ))
    })?;

    Ok(Submission {
        id: model.id,
        code: model.code,
        fields,
        captured_at: model.captured_at,
    })
}

pub fn submission_to_active_model(sub: &Submission) -> Result<submission::ActiveModel> {
    use sea_orm::ActiveValue::Set;

    let fields_json = serde_json::to_string(&sub.fields)?;

    Ok(submission::ActiveModel {
        id: Set(sub.id.clone()),
        code: Set(sub.code.clone()),
        fields_json: Set(fields_json),
        captured_at: Set(sub.captured_at),
    })
}
