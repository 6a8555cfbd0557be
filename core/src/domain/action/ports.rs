use crate::domain::{
    action::entities::{ActionEnvelope, FormSubmission},
    schema::{OutfitSuggestion, RateOutfitOutput, SuggestHairstyleOutput},
};

/// Boundary actions: raw form submission in, UI envelope out. Never fails.
#[cfg_attr(test, mockall::automock)]
pub trait ActionService: Send + Sync {
    fn rate_outfit_action(
        &self,
        form: FormSubmission,
    ) -> impl Future<Output = ActionEnvelope<RateOutfitOutput>> + Send;

    fn suggest_outfit_action(
        &self,
        form: FormSubmission,
    ) -> impl Future<Output = ActionEnvelope<OutfitSuggestion>> + Send;

    fn suggest_hairstyle_action(
        &self,
        form: FormSubmission,
    ) -> impl Future<Output = ActionEnvelope<SuggestHairstyleOutput>> + Send;
}
