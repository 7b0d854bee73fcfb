//! Localized message tables.
//!
//! Callers pick a [`Message`] key; the text for each supported
//! [`Language`] lives here and nowhere else.

use crate::language::Language;

/// A user-facing message with its interpolation arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    Required { label: &'a str },
    MinLength { label: &'a str, min: usize },
    MaxLength { label: &'a str, max: usize },
    Number { label: &'a str },
    Decimal { label: &'a str },
    Email { label: &'a str },
    Phone { label: &'a str },
    Uuid { label: &'a str },
    AlreadyExists { label: &'a str },
    NotFound { label: &'a str },
    Created { label: &'a str },
    Updated { label: &'a str },
    Deleted { label: &'a str },
    Fetched { label: &'a str },
    Unauthenticated,
    PermissionDenied,
    TenantDenied,
    InvalidCredentials,
    LoggedIn,
    InvalidBody,
    Internal,
}

impl Message<'_> {
    pub fn render(&self, lang: Language) -> String {
        match lang {
            Language::En => self.render_en(),
            Language::Ar => self.render_ar(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Message::Required { label } => format!("{label} is required."),
            Message::MinLength { label, min } => {
                format!("{label} must be at least {min} characters.")
            }
            Message::MaxLength { label, max } => {
                format!("{label} must not exceed {max} characters.")
            }
            Message::Number { label } => format!("{label} must be a number."),
            Message::Decimal { label } => format!("{label} must be a decimal number."),
            Message::Email { label } => format!("{label} must be a valid email address."),
            Message::Phone { label } => format!("{label} must be a valid phone number."),
            Message::Uuid { label } => format!("{label} must be a valid identifier."),
            Message::AlreadyExists { label } => format!("{label} already exists."),
            Message::NotFound { label } => format!("{label} not found."),
            Message::Created { label } => format!("{label} created successfully."),
            Message::Updated { label } => format!("{label} updated successfully."),
            Message::Deleted { label } => format!("{label} deleted successfully."),
            Message::Fetched { label } => format!("{label} fetched successfully."),
            Message::Unauthenticated => "Unauthorized.".into(),
            Message::PermissionDenied => {
                "You do not have permission to perform this action.".into()
            }
            Message::TenantDenied => "You do not have access to this tenant.".into(),
            Message::InvalidCredentials => "Invalid email or password.".into(),
            Message::LoggedIn => "Logged in successfully.".into(),
            Message::InvalidBody => "The request body is not valid JSON.".into(),
            Message::Internal => "Something went wrong. Please try again.".into(),
        }
    }

    fn render_ar(&self) -> String {
        match self {
            Message::Required { label } => format!("الحقل {label} مطلوب."),
            Message::MinLength { label, min } => {
                format!("يجب أن يحتوي {label} على {min} أحرف على الأقل.")
            }
            Message::MaxLength { label, max } => {
                format!("يجب ألا يتجاوز {label} {max} حرفًا.")
            }
            Message::Number { label } => format!("يجب أن يكون {label} رقمًا."),
            Message::Decimal { label } => format!("يجب أن يكون {label} رقمًا عشريًا."),
            Message::Email { label } => format!("يجب أن يكون {label} بريدًا إلكترونيًا صالحًا."),
            Message::Phone { label } => format!("يجب أن يكون {label} رقم هاتف صالحًا."),
            Message::Uuid { label } => format!("يجب أن يكون {label} معرّفًا صالحًا."),
            Message::AlreadyExists { label } => format!("{label} موجود بالفعل."),
            Message::NotFound { label } => format!("{label} غير موجود."),
            Message::Created { label } => format!("تم إنشاء {label} بنجاح."),
            Message::Updated { label } => format!("تم تحديث {label} بنجاح."),
            Message::Deleted { label } => format!("تم حذف {label} بنجاح."),
            Message::Fetched { label } => format!("تم جلب {label} بنجاح."),
            Message::Unauthenticated => "غير مصرح.".into(),
            Message::PermissionDenied => "ليس لديك صلاحية لتنفيذ هذا الإجراء.".into(),
            Message::TenantDenied => "ليس لديك صلاحية الوصول إلى هذه المؤسسة.".into(),
            Message::InvalidCredentials => "البريد الإلكتروني أو كلمة المرور غير صحيحة.".into(),
            Message::LoggedIn => "تم تسجيل الدخول بنجاح.".into(),
            Message::InvalidBody => "نص الطلب ليس JSON صالحًا.".into(),
            Message::Internal => "حدث خطأ ما. يرجى المحاولة مرة أخرى.".into(),
        }
    }
}

/// Localized label for a field or entity key. Unknown keys are
/// returned unchanged.
pub fn label(lang: Language, key: &str) -> &str {
    let pair = match key {
        "name" => ("Name", "الاسم"),
        "email" => ("Email", "البريد الإلكتروني"),
        "password" => ("Password", "كلمة المرور"),
        "phone" => ("Phone", "الهاتف"),
        "address" => ("Address", "العنوان"),
        "tenant_id" => ("Tenant", "المؤسسة"),
        "branch" => ("Branch", "الفرع"),
        "branches" => ("Branches", "الفروع"),
        "offset" => ("Offset", "الإزاحة"),
        "limit" => ("Limit", "الحد"),
        _ => return key,
    };
    match lang {
        Language::En => pair.0,
        Language::Ar => pair.1,
    }
}
