
#[cfg(test)]
mod test {
    use crate::commons::TestContext;
    use campaign_dispatcher::campaign::CampaignRequest;
    use campaign_dispatcher::campaign_dispatcher::CampaignDispatcher;
    use campaign_dispatcher::capability::WhatsAppCapability;
    use campaign_dispatcher::connection_state::{ConnectionState, SessionEvent};
    use campaign_dispatcher::dispatch_settings::DispatchSettings;
    use campaign_dispatcher::pacer::Pacer;
    use campaign_dispatcher::participant::Participant;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use test_context::test_context;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    struct NoPause;

    #[async_trait::async_trait]
    impl Pacer for NoPause {
        async fn pause(
            &self,
            _duration: Duration,
        ) {
        }
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_read_connection_state_from_tracker(ctx: &mut TestContext) {
        assert_eq!(ConnectionState::Disconnected, ctx.capability.connection_state().await);

        ctx.tracker.apply(&SessionEvent::Ready);

        assert_eq!(ConnectionState::Connected, ctx.capability.connection_state().await);
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_fetch_group_participants(ctx: &mut TestContext) {
        Mock::given(method("GET"))
            .and(path("/groups/120363025555@g.us/participants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "participants": [
                    {"id": "628111@s.whatsapp.net"},
                    {"identifier": "628222@s.whatsapp.net"}
                ]
            })))
            .mount(&ctx.mock_server)
            .await;

        let participants = ctx.capability.fetch_group_participants("120363025555@g.us").await.unwrap();

        assert_eq!(vec![Participant::new("628111@s.whatsapp.net"), Participant::new("628222@s.whatsapp.net")], participants);
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_fail_lookup_for_unknown_group(ctx: &mut TestContext) {
        Mock::given(method("GET"))
            .and(path("/groups/missing@g.us/participants"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&ctx.mock_server)
            .await;

        let error = ctx.capability.fetch_group_participants("missing@g.us").await.unwrap_err();

        assert!(error.cause.contains("not found"));
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_fail_lookup_on_bridge_error(ctx: &mut TestContext) {
        Mock::given(method("GET"))
            .and(path("/groups/broken@g.us/participants"))
            .respond_with(ResponseTemplate::new(502).set_body_string("client not ready"))
            .mount(&ctx.mock_server)
            .await;

        let error = ctx.capability.fetch_group_participants("broken@g.us").await.unwrap_err();

        assert!(error.cause.contains("502"));
        assert!(error.cause.contains("client not ready"));
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_send_message_through_bridge(ctx: &mut TestContext) {
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_json(json!({"to": "628111@s.whatsapp.net", "body": "Halo"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&ctx.mock_server)
            .await;

        let result = ctx.capability.send_message("628111@s.whatsapp.net", "Halo").await;

        assert!(result.is_ok());
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_report_send_failure_reason(ctx: &mut TestContext) {
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("rate-overlimit"))
            .mount(&ctx.mock_server)
            .await;

        let error = ctx.capability.send_message("628111@s.whatsapp.net", "Halo").await.unwrap_err();

        assert!(error.reason().contains("rate-overlimit"));
        assert!(error.reason().starts_with("Failed to send message"));
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_list_groups(ctx: &mut TestContext) {
        Mock::given(method("GET"))
            .and(path("/groups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "groups": [
                    {"id": "1@g.us", "name": "Keluarga", "participants": 12},
                    {"id": "2@g.us", "name": "Kantor", "participantCount": 40}
                ]
            })))
            .mount(&ctx.mock_server)
            .await;

        let groups = ctx.capability.list_groups().await.unwrap();

        assert_eq!(2, groups.len());
        assert_eq!("Keluarga", groups[0].name);
        assert_eq!(12, groups[0].participant_count);
        assert_eq!(40, groups[1].participant_count);
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_move_to_connecting_after_connect_request(ctx: &mut TestContext) {
        Mock::given(method("POST")).and(path("/connect")).respond_with(ResponseTemplate::new(202)).mount(&ctx.mock_server).await;

        let snapshot = ctx.capability.connect().await.unwrap();

        assert_eq!(ConnectionState::Connecting, snapshot.state);
        assert_eq!(ConnectionState::Connecting, ctx.tracker.state());
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_keep_state_when_connect_request_fails(ctx: &mut TestContext) {
        Mock::given(method("POST")).and(path("/connect")).respond_with(ResponseTemplate::new(503)).mount(&ctx.mock_server).await;

        let result = ctx.capability.connect().await;

        assert!(result.is_err());
        assert_eq!(ConnectionState::Disconnected, ctx.tracker.state());
    }

    #[test_context(TestContext)]
    #[tokio::test]
    async fn should_dispatch_campaign_end_to_end_through_bridge(ctx: &mut TestContext) {
        ctx.tracker.apply(&SessionEvent::Ready);

        Mock::given(method("GET"))
            .and(path("/groups/1@g.us/participants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "participants": [{"id": "628111@s.whatsapp.net"}, {"id": "628222@s.whatsapp.net"}]
            })))
            .mount(&ctx.mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_json(json!({"to": "628111@s.whatsapp.net", "body": "Halo"})))
            .respond_with(ResponseTemplate::new(200))
            .mount(&ctx.mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_json(json!({"to": "628222@s.whatsapp.net", "body": "Halo"})))
            .respond_with(ResponseTemplate::new(500).set_body_string("not on whatsapp"))
            .mount(&ctx.mock_server)
            .await;

        let dispatcher = CampaignDispatcher::new(DispatchSettings::default()).with_pacer(Arc::new(NoPause));

        let result = dispatcher.dispatch(&CampaignRequest::new("1@g.us", "Halo"), &ctx.capability).await.unwrap();

        assert_eq!(2, result.total_participants);
        assert_eq!(1, result.success_count);
        assert_eq!(1, result.failure_count);
    }
}
