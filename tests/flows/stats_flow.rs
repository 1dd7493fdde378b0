#[path = "../common/mod.rs"]
mod common;
use common::{init_tracing, TestDocuments, TestServer, TestServerBuilder};

use bindstats_application::ports::StatsClient;
use bindstats_application::GetStatisticsUseCase;
use bindstats_domain::{ClientConfig, Counter, Gauge, StatisticGroup, Task};
use bindstats_infrastructure::HttpXmlTransport;
use std::sync::Arc;

fn client_for(base_url: String) -> GetStatisticsUseCase<HttpXmlTransport> {
    let config = ClientConfig::new(base_url);
    let transport = HttpXmlTransport::new(&config).expect("Failed to build transport");
    GetStatisticsUseCase::from_config(Arc::new(transport), &config)
}

// ============================================================================
// Complete poll
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_poll_normalizes_every_group() {
    init_tracing();
    let server = TestServer::start().await.expect("Failed to start server");
    let client = client_for(server.base_url());

    let stats = client.stats(&[]).await.unwrap();

    assert_eq!(stats.server.boot_time.to_rfc3339(), "2021-07-15T05:11:08.926+00:00");
    assert_eq!(stats.server.incoming_requests.len(), 3);
    assert_eq!(stats.server.server_rcodes[3], Counter::new("NXDOMAIN", 33958));
    assert_eq!(stats.server.incoming_queries[1], Counter::new("AAAA", 97741));
    assert_eq!(stats.server.name_server_stats[4], Counter::new("RecursClients", 76));
    assert_eq!(stats.server.zone_statistics[1], Counter::new("XfrSuccess", 2));

    let names: Vec<&str> = stats.views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["_default", "_bind"]);
    assert_eq!(
        stats.views[0].cache,
        vec![Gauge::new("A", 34), Gauge::new("!AAAA", 2)]
    );
    assert_eq!(stats.views[0].resolver_queries[1], Counter::new("NS", 9));
    assert_eq!(stats.views[1].resolver_stats, vec![Counter::new("REFUSED", 17)]);

    assert_eq!(stats.zone_views.len(), 2);
    let zones = &stats.zone_views[0].zone_data;
    assert_eq!(zones[0].name, "localhost");
    assert_eq!(zones[0].zone_qtype[1], Counter::new("A", 3));
    assert_eq!(zones[1].serial, "4294967296");
    assert!(zones[1].zone_rcode.is_empty());
    assert!(stats.zone_views[1].zone_data.is_empty());

    assert_eq!(stats.task_manager.thread_model.tasks_running, 8);
    assert_eq!(stats.task_manager.tasks.len(), 2);

    assert_eq!(
        server.requests(),
        vec![
            TestDocuments::SERVER_PATH.to_string(),
            TestDocuments::TASKS_PATH.to_string(),
            TestDocuments::ZONES_PATH.to_string(),
        ]
    );

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_view_and_task_round_trip() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = client_for(server.base_url());

    let stats = client
        .stats(&[StatisticGroup::View, StatisticGroup::Tasks])
        .await
        .unwrap();

    let view = &stats.views[0];
    assert_eq!(view.name, "_default");
    let rtt: Vec<&Counter> = view.query_rtt().collect();
    assert_eq!(
        rtt,
        vec![&Counter::new("QryRTT1", 10), &Counter::new("QryRTT2", 5)]
    );
    assert_eq!(
        stats.task_manager.tasks[0],
        Task {
            id: "0x7f0a1c00b010".to_string(),
            name: "res0".to_string(),
            quantum: -1,
            references: 3,
            state: "RUNNING".to_string(),
        }
    );
    assert_eq!(stats.server, Default::default());

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_each_group_populates_only_its_fields() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = client_for(server.base_url());

    let server_only = client.stats(&[StatisticGroup::Server]).await.unwrap();
    assert!(!server_only.server.server_rcodes.is_empty());
    assert!(server_only.views.is_empty());
    assert!(server_only.zone_views.is_empty());
    assert_eq!(server_only.task_manager, Default::default());

    let tasks_only = client.stats(&[StatisticGroup::Tasks]).await.unwrap();
    assert_eq!(tasks_only.server, Default::default());
    assert!(tasks_only.views.is_empty());
    assert_eq!(tasks_only.task_manager.tasks.len(), 2);

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_no_groups_equals_all_groups() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = client_for(server.base_url());

    let implicit = client.stats(&[]).await.unwrap();
    let explicit = client.stats(&StatisticGroup::ALL).await.unwrap();

    assert_eq!(implicit, explicit);

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_behind_root_path() {
    let server = TestServerBuilder::new()
        .with_root("/bind")
        .build()
        .await
        .expect("Failed to start server");
    let client = client_for(format!("{}/bind/", server.base_url()));

    let stats = client.stats(&[StatisticGroup::Tasks]).await.unwrap();

    assert_eq!(stats.task_manager.thread_model.worker_threads, 16);
    assert_eq!(server.requests(), vec!["/bind/xml/v3/tasks".to_string()]);

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_view_without_zones_element() {
    let server = TestServerBuilder::new()
        .with_document(
            TestDocuments::ZONES_PATH,
            r#"<statistics version="3.11"><views><view name="_default"></view></views></statistics>"#,
        )
        .build()
        .await
        .expect("Failed to start server");
    let client = client_for(server.base_url());

    let stats = client.stats(&[StatisticGroup::View]).await.unwrap();

    assert_eq!(stats.zone_views.len(), 1);
    assert!(stats.zone_views[0].zone_data.is_empty());

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_schema_drift_is_tolerated() {
    let server = TestServerBuilder::new()
        .with_document(
            TestDocuments::TASKS_PATH,
            r#"<statistics version="3.99">
                 <memory><contexts><context><id>0x1</id></context></contexts></memory>
                 <taskmgr>
                   <thread-model><type>threaded</type><worker-threads>2</worker-threads><new-knob>1</new-knob></thread-model>
                   <tasks><task><id>0x9</id><state>draining</state><priority>high</priority></task></tasks>
                 </taskmgr>
               </statistics>"#,
        )
        .build()
        .await
        .expect("Failed to start server");
    let client = client_for(server.base_url());

    let stats = client.stats(&[StatisticGroup::Tasks]).await.unwrap();

    assert_eq!(stats.task_manager.thread_model.worker_threads, 2);
    assert_eq!(stats.task_manager.tasks[0].state, "draining");

    server.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_overlapping_polls_share_one_client() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = Arc::new(client_for(server.base_url()));

    let polls: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.stats(&[]).await })
        })
        .collect();

    for poll in polls {
        let stats = poll.await.unwrap().unwrap();
        assert_eq!(stats.views.len(), 2);
    }

    server.shutdown();
}
