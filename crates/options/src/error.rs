use std::borrow::Cow;

/// A specialized [`ServiceError`] enum of this crate.
///
/// Only validated construction ([`Service::try_new`](crate::Service::try_new)) produces it;
/// plain construction cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid service address{}: {message}", format_context(.context))]
    InvalidAddress { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid service configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub(crate) type Result<T, E = ServiceError> = std::result::Result<T, E>;

pub trait ServiceErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ServiceError>;
}

impl<T> ServiceErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                ServiceError::InvalidAddress { context: c, .. }
                | ServiceError::InvalidConfiguration { context: c, .. } => {
                    *c = Some(context.into());
                },
            }
            e
        })
    }
}

#[allow(clippy::ref_option)]
pub(crate) fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
