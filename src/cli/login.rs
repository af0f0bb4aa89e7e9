use crate::{management::SharedSession, spotify};

pub async fn login(shared_state: SharedSession) {
    spotify::auth::login(shared_state).await;
}
