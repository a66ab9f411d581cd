use utoipa::OpenApi;

use crate::routes::{auth, health, messages, threads, users};

#[derive(OpenApi)]
#[openapi(
    info(title = "Parrot API", description = "Threads of messages with a scripted chatbot"),
    paths(
        health::health_check,
        auth::sign_in,
        users::get_me,
        threads::list_threads,
        threads::delete_thread,
        messages::list_messages,
        messages::send_message,
    ),
    components(schemas(
        health::HealthResponse,
        auth::SignInRequest,
        users::UserResponse,
        threads::ThreadResponse,
        messages::MessageResponse,
        messages::SendMessageRequest,
        messages::SendMessageResponse,
        messages::UserMessageResponse,
        messages::ChatbotMessageResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Sign-in by name"),
        (name = "users", description = "Calling user"),
        (name = "threads", description = "Conversation threads"),
        (name = "messages", description = "Messages and chatbot replies"),
    )
)]
pub struct ApiDoc;
