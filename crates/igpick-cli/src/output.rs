use igpick_picker::PickResponse;

/// Renders a pick outcome for the terminal.
pub(crate) fn render(response: &PickResponse) -> String {
    match response {
        PickResponse::Success {
            winner,
            info,
            timestamp,
            ..
        } => {
            let visibility = if winner.is_private { "private" } else { "public" };
            let verified = if winner.is_verified { "yes" } else { "no" };
            let picture = if winner.profile_pic_url.is_empty() {
                "none"
            } else {
                "available"
            };
            format!(
                "Winner: @{username}\n  \
                 name:      {full_name}\n  \
                 account:   {visibility}\n  \
                 verified:  {verified}\n  \
                 picture:   {picture}\n  \
                 drawn {info}\n  \
                 at {timestamp}\n",
                username = winner.username,
                full_name = winner.full_name,
            )
        }
        PickResponse::Failure { error, .. } => format!("error: {error}\n"),
    }
}
