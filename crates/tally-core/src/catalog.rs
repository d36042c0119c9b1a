//! Localized user-facing strings.
//!
//! Each locale owns one [`MessageCatalog`]; adding a language means adding a
//! catalog to [`CATALOGS`], nothing else.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tally_domain::{Locale, QuotaStatus, Tenant, Tier, TimeBucket};

/// All user-facing strings for one locale.
///
/// Templates use `{name}` placeholders filled by the helper methods.
#[derive(Debug)]
pub struct MessageCatalog {
    pub suggestions: [&'static str; 5],
    pub invalid_credentials: &'static str,
    pub invalid_income: &'static str,
    pub wrong_old_password: &'static str,
    pub password_too_short: &'static str,
    pub password_changed: &'static str,
    pub storage_unavailable: &'static str,
    pub entry_saved: &'static str,
    pub logged_in: &'static str,
    pub logged_out: &'static str,
    pub today_income_label: &'static str,
    pub average_7_label: &'static str,
    pub average_30_label: &'static str,
    pub weak_time_label: &'static str,
    pub tips_label: &'static str,
    pub recent_label: &'static str,
    pub not_logged_in: &'static str,
    pub config_error: &'static str,
    pub secret_required: &'static str,
    pub help_hint: &'static str,
    pub no_tenants: &'static str,
    pub password_prompt: &'static str,
    pub current_password_prompt: &'static str,
    pub new_password_prompt: &'static str,
    quota_reached: &'static str,
    plan_status: &'static str,
    tenant_exists: &'static str,
    invalid_arguments: &'static str,
    unknown_command: &'static str,
    suggestion: &'static str,
    tenant_registered: &'static str,
    language_set: &'static str,
    unknown_tier: &'static str,
    buckets: [&'static str; 3],
}

impl MessageCatalog {
    pub fn quota_reached(&self, limit: usize) -> String {
        self.quota_reached.replace("{limit}", &limit.to_string())
    }

    pub fn tenant_exists(&self, tenant: &str) -> String {
        self.tenant_exists.replace("{tenant}", tenant)
    }

    pub fn invalid_arguments(&self, usage: &str) -> String {
        self.invalid_arguments.replace("{usage}", usage)
    }

    pub fn unknown_command(&self, command: &str) -> String {
        self.unknown_command.replace("{command}", command)
    }

    pub fn suggestion(&self, command: &str) -> String {
        self.suggestion.replace("{command}", command)
    }

    pub fn tenant_registered(&self, tenant: &Tenant) -> String {
        self.tenant_registered
            .replace("{tenant}", &tenant.id)
            .replace("{plan}", tenant.tier.label())
            .replace("{ledger}", &tenant.ledger)
    }

    pub fn language_set(&self, locale: Locale) -> String {
        self.language_set.replace("{lang}", locale.code())
    }

    pub fn unknown_tier(&self, tier: &Tier) -> String {
        self.unknown_tier.replace("{plan}", tier.label())
    }

    pub fn plan_status(&self, tier: &Tier, quota: &QuotaStatus) -> String {
        self.plan_status
            .replace("{plan}", tier.label())
            .replace("{count}", &quota.count.to_string())
            .replace("{limit}", &quota.limit.to_string())
    }

    pub fn bucket_label(&self, bucket: TimeBucket) -> &'static str {
        match bucket {
            TimeBucket::Morning => self.buckets[0],
            TimeBucket::Afternoon => self.buckets[1],
            TimeBucket::Evening => self.buckets[2],
        }
    }
}

static ARABIC: MessageCatalog = MessageCatalog {
    suggestions: [
        "اعمل عرض سريع ساعة (1+1 / خصم 20%).",
        "ركّز على الإضافات (حلويات / شوت زيادة / كومبو).",
        "ذكّر الزباين الدائمين (واتساب/ستوري).",
        "وزّع الشغل صح على ساعة الذروة.",
        "جرّب تذوق بسيط على باب المحل.",
    ],
    invalid_credentials: "خطأ بالبيانات",
    invalid_income: "دخل غير صحيح",
    wrong_old_password: "كلمة المرور القديمة غلط",
    password_too_short: "خليها 4 أحرف/أرقام على الأقل",
    password_changed: "تم تغيير كلمة المرور",
    storage_unavailable: "تعذر الوصول إلى السجل",
    entry_saved: "تم حفظ الإدخال",
    logged_in: "أهلاً",
    logged_out: "تم تسجيل الخروج",
    today_income_label: "دخل اليوم",
    average_7_label: "متوسط آخر 7 أيام",
    average_30_label: "متوسط آخر 30 يوم",
    weak_time_label: "أضعف فترة اليوم",
    tips_label: "اقتراحات",
    recent_label: "آخر الإدخالات",
    not_logged_in: "سجّل الدخول أولاً (login <tenant>)",
    config_error: "ملف الإعدادات غير صالح",
    secret_required: "كلمة المرور مطلوبة في وضع السكربت",
    help_hint: "اكتب `help <command>` لتفاصيل الاستخدام.",
    no_tenants: "لا توجد حسابات. استخدم `tenant-add` لإنشاء حساب.",
    password_prompt: "كلمة المرور",
    current_password_prompt: "كلمة المرور الحالية",
    new_password_prompt: "كلمة المرور الجديدة",
    tenant_exists: "الحساب موجود مسبقاً: {tenant}",
    invalid_arguments: "مدخلات غير صحيحة. الاستخدام: {usage}",
    unknown_command: "أمر غير معروف `{command}`. اكتب `help` لعرض الأوامر.",
    suggestion: "هل تقصد `{command}`؟",
    tenant_registered: "تم تسجيل الحساب `{tenant}` ({plan}، السجل `{ledger}`).",
    language_set: "اللغة: {lang}",
    unknown_tier: "اشتراك غير معروف `{plan}`، سيأخذ الحد اليومي الافتراضي.",
    quota_reached: "وصلت حد اشتراكك اليوم ({limit} مرات).",
    plan_status: "اشتراكك: {plan} | اليوم سجلت {count} من {limit}",
    buckets: ["الصبح (8-11)", "الظهر/العصر (12-16)", "المساء (17-22)"],
};

static ENGLISH: MessageCatalog = MessageCatalog {
    suggestions: [
        "Run a quick 1-hour offer (BOGO / 20% off).",
        "Push add-ons (dessert / extra shot / combo).",
        "Call regular customers (WhatsApp / stories).",
        "Adjust staff focus during peak time.",
        "Try a small sampling at the entrance.",
    ],
    invalid_credentials: "Invalid credentials",
    invalid_income: "Invalid income",
    wrong_old_password: "Wrong old password",
    password_too_short: "Min 4 chars",
    password_changed: "Password changed",
    storage_unavailable: "Ledger storage is unavailable",
    entry_saved: "Entry saved",
    logged_in: "Welcome",
    logged_out: "Logged out",
    today_income_label: "Today's income",
    average_7_label: "7-day average",
    average_30_label: "30-day average",
    weak_time_label: "Weakest time today",
    tips_label: "Suggestions",
    recent_label: "Recent entries",
    not_logged_in: "Not logged in. Use `login <tenant>` first.",
    config_error: "Configuration file is invalid",
    secret_required: "A password is required in script mode",
    help_hint: "Use `help <command>` for usage details.",
    no_tenants: "No tenants registered. Use `tenant-add` to create one.",
    password_prompt: "Password",
    current_password_prompt: "Current password",
    new_password_prompt: "New password",
    tenant_exists: "Tenant already exists: {tenant}",
    invalid_arguments: "Invalid arguments. Usage: {usage}",
    unknown_command: "Unknown command `{command}`. Type `help` to see available commands.",
    suggestion: "Suggestion: `{command}`?",
    tenant_registered: "Tenant `{tenant}` registered ({plan}, ledger `{ledger}`).",
    language_set: "Language: {lang}",
    unknown_tier: "Unknown tier `{plan}`; it will get the default daily quota.",
    quota_reached: "You reached your daily plan limit ({limit} entries).",
    plan_status: "Plan: {plan} | Today entries {count}/{limit}",
    buckets: ["Morning (8-11)", "Afternoon (12-16)", "Evening (17-22)"],
};

pub static CATALOGS: Lazy<HashMap<Locale, &'static MessageCatalog>> =
    Lazy::new(|| HashMap::from([(Locale::Ar, &ARABIC), (Locale::En, &ENGLISH)]));

/// Catalog for `locale`, or the Arabic catalog when the locale has none.
pub fn catalog(locale: Locale) -> &'static MessageCatalog {
    CATALOGS.get(&locale).copied().unwrap_or(&ARABIC)
}

/// The five canned improvement tips, in display order.
pub fn suggestions(locale: Locale) -> Vec<String> {
    catalog(locale)
        .suggestions
        .iter()
        .map(|tip| tip.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_has_five_suggestions() {
        for locale in Locale::ALL {
            assert_eq!(suggestions(locale).len(), 5);
            assert!(CATALOGS.contains_key(&locale));
        }
    }

    #[test]
    fn templates_fill_placeholders() {
        let en = catalog(Locale::En);
        assert_eq!(
            en.quota_reached(2),
            "You reached your daily plan limit (2 entries)."
        );
        let status = QuotaStatus::new(1, 3);
        assert_eq!(
            en.plan_status(&Tier::Platinum, &status),
            "Plan: platinum | Today entries 1/3"
        );
        assert!(catalog(Locale::Ar).quota_reached(1).contains('1'));
        let tenant = Tenant::new("cafe1", String::new(), Tier::Gold);
        assert_eq!(
            en.tenant_registered(&tenant),
            "Tenant `cafe1` registered (gold, ledger `cafe1`)."
        );
        assert_eq!(
            catalog(Locale::Ar).invalid_arguments("add <income>"),
            "مدخلات غير صحيحة. الاستخدام: add <income>"
        );
        assert_eq!(en.language_set(Locale::Ar), "Language: ar");
    }

    #[test]
    fn bucket_labels_follow_locale() {
        assert_eq!(
            catalog(Locale::En).bucket_label(TimeBucket::Evening),
            "Evening (17-22)"
        );
        assert_eq!(
            catalog(Locale::Ar).bucket_label(TimeBucket::Morning),
            "الصبح (8-11)"
        );
    }
}
