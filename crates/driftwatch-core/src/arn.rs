//! Resource identifier normalisation.
//!
//! CloudFormation reports physical resource ids either as plain names
//! (`my-bucket`, `/aws/lambda/my-func`) or as full ARNs. Notifications show
//! the short form, so ARNs are reduced to their resource part.

use crate::error::ArnError;

const ARN_PREFIX: &str = "arn:aws:";

/// A parsed `arn:aws:...` identifier.
///
/// See <http://docs.aws.amazon.com/general/latest/gr/aws-arns-and-namespaces.html>.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account: &'a str,
    /// `function`, `role`, `table`, ... when the tail carries a type prefix.
    pub resource_type: Option<&'a str>,
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Parse a full ARN. The resource tail may itself contain `:` or `/`;
    /// only the first `/` (or, failing that, the first `:`) separates the
    /// resource type from the resource.
    pub fn parse(raw: &'a str) -> Result<Self, ArnError> {
        if !is_arn(raw) {
            return Err(ArnError::NotAnArn(raw.to_string()));
        }

        let parts: Vec<&str> = raw.splitn(6, ':').collect();
        let &[_, partition, service, region, account, tail] = parts.as_slice() else {
            return Err(ArnError::TooFewParts {
                raw: raw.to_string(),
                parts: parts.len(),
            });
        };

        let (resource_type, resource) = match tail.split_once('/') {
            Some((kind, rest)) => (Some(kind), rest),
            None => match tail.split_once(':') {
                Some((kind, rest)) => (Some(kind), rest),
                None => (None, tail),
            },
        };

        Ok(Self {
            partition,
            service,
            region,
            account,
            resource_type,
            resource,
        })
    }
}

pub fn is_arn(raw: &str) -> bool {
    raw.starts_with(ARN_PREFIX)
}

/// Short display form of a physical resource id.
///
/// Plain names pass through verbatim. ARNs are reduced to their resource
/// part. An `arn:aws:` string too short to be a real ARN is also returned
/// verbatim, since the raw id is still the most useful thing to show.
pub fn normalize(raw: &str) -> String {
    match Arn::parse(raw) {
        Ok(arn) => arn.resource.to_string(),
        Err(ArnError::NotAnArn(_) | ArnError::TooFewParts { .. }) => raw.to_string(),
    }
}
