// tests/pg.rs
//
// Repositórios Postgres contra um banco de verdade. Só rodam com DATABASE_URL
// definida (sem ela cada teste retorna na hora). Cada teste cria um schema
// próprio, roda as migrações nele e o descarta no fim.

use std::{
    str::FromStr,
    sync::atomic::{AtomicU32, Ordering},
};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

use barbearia_backend::{
    common::error::AppError,
    config::AppState,
    db::{
        AgendaRepository, BarbeariaRepository, ClienteRepository, PgAgendaRepository,
        PgBarbeariaRepository, PgClienteRepository, PgServicoRepository, ServicoRepository,
    },
    models::{
        agenda::Agenda,
        barbearia::Barbearia,
        cliente::Cliente,
        servico::{Servico, ServicoPayload},
    },
};

static SEQUENCIA: AtomicU32 = AtomicU32::new(0);

struct Banco {
    pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl Banco {
    async fn abrir() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL não definida; teste de Postgres ignorado");
            return None;
        };

        let schema = format!(
            "teste_{}_{}",
            std::process::id(),
            SEQUENCIA.fetch_add(1, Ordering::SeqCst)
        );

        let admin = PgPoolOptions::new().max_connections(1).connect(&url).await.unwrap();
        sqlx::query(&format!("CREATE SCHEMA {schema}")).execute(&admin).await.unwrap();

        let options = PgConnectOptions::from_str(&url)
            .unwrap()
            .options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new().max_connections(2).connect_with(options).await.unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();

        Some(Self { pool, admin, schema })
    }

    async fn descartar(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .unwrap();
    }
}

fn barbearia(cnpj: Option<&str>) -> Barbearia {
    Barbearia {
        id: None,
        nome: "Shop".into(),
        cnpj: cnpj.map(String::from),
        telefone: None,
        email: None,
        endereco: None,
    }
}

fn cliente(cpf: Option<&str>, barbearia_id: Option<i64>) -> Cliente {
    Cliente {
        id: None,
        nome: "Ana".into(),
        cpf: cpf.map(String::from),
        telefone: None,
        email: None,
        endereco: None,
        barbearia_id,
    }
}

fn agenda(data: NaiveDateTime, barbearia_id: Option<i64>, cliente_id: Option<i64>) -> Agenda {
    Agenda { id: None, data, descricao: None, barbearia_id, cliente_id }
}

fn dt(ano: i32, mes: u32, dia: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(ano, mes, dia).unwrap().and_hms_opt(h, m, s).unwrap()
}

fn nomes(lista: &[&str]) -> Vec<String> {
    lista.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn equipe_volta_na_ordem_e_valor_sem_arredondar() {
    let Some(banco) = Banco::abrir().await else { return };
    let repo = PgServicoRepository::new(banco.pool.clone());

    let valor = Decimal::from_str("35.555").unwrap();
    let novo = Servico::new("Corte", valor, &nomes(&["Pedro", "Ana", "João"]), None, None).unwrap();

    let gravado = repo.save(novo).await.unwrap();
    let id = gravado.id().unwrap();
    assert_eq!(gravado.valor(), valor);
    assert_eq!(gravado.duracao(), 30);
    assert_eq!(gravado.funcionarios(), nomes(&["Pedro", "Ana", "João"]).as_slice());

    let lido = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(lido, gravado);

    // update troca a lista inteira, inclusive a ordem
    let mut alterado = lido;
    alterado.set_funcionarios(&nomes(&["João", "Pedro"]));
    alterado.set_valor(Decimal::from_str("123456789.0").unwrap()).unwrap();
    let regravado = repo.save(alterado).await.unwrap();
    assert_eq!(regravado.funcionarios(), nomes(&["João", "Pedro"]).as_slice());
    assert_eq!(regravado.valor(), Decimal::from(123_456_789));

    let sem_equipe = Servico::new("Barba", Decimal::TEN, &[], Some(15), None).unwrap();
    let sem_equipe = repo.save(sem_equipe).await.unwrap();
    assert!(repo.find_by_id(sem_equipe.id().unwrap()).await.unwrap().unwrap().funcionarios().is_empty());

    banco.descartar().await;
}

#[tokio::test]
async fn servico_criado_pelo_servico_bate_com_a_leitura() {
    let Some(banco) = Banco::abrir().await else { return };
    let app_state = AppState::new(banco.pool.clone());

    let barbearia_id = PgBarbeariaRepository::new(banco.pool.clone())
        .save(barbearia(None))
        .await
        .unwrap()
        .id
        .unwrap();

    let payload = ServicoPayload {
        nome: "Corte".into(),
        valor: Some(Decimal::from_str("35.555").unwrap()),
        funcionarios: vec![],
        duracao: None,
        descricao: None,
    };
    let criado = app_state.servico_service.create_with_barbearia(payload, barbearia_id).await.unwrap();
    let lido = app_state.servico_service.find_by_id(criado.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(criado, lido);
    assert_eq!(lido.barbearia_id(), Some(barbearia_id));

    banco.descartar().await;
}

#[tokio::test]
async fn apagar_barbearia_cascateia_e_agenda_perde_o_cliente() {
    let Some(banco) = Banco::abrir().await else { return };
    let barbearias = PgBarbeariaRepository::new(banco.pool.clone());
    let clientes = PgClienteRepository::new(banco.pool.clone());
    let servicos = PgServicoRepository::new(banco.pool.clone());
    let agendas = PgAgendaRepository::new(banco.pool.clone());

    let a = barbearias.save(barbearia(None)).await.unwrap().id.unwrap();
    let b = barbearias.save(barbearia(None)).await.unwrap().id.unwrap();
    let c = clientes.save(cliente(None, Some(a))).await.unwrap().id.unwrap();

    let mut servico = Servico::new("Corte", Decimal::TEN, &nomes(&["Pedro"]), None, None).unwrap();
    servico.set_barbearia_id(Some(a));
    servicos.save(servico).await.unwrap();

    agendas.save(agenda(dt(2024, 3, 1, 8, 0, 0), Some(a), Some(c))).await.unwrap();
    let em_b = agendas.save(agenda(dt(2024, 3, 2, 8, 0, 0), Some(b), Some(c))).await.unwrap();

    barbearias.delete_by_id(a).await.unwrap();

    assert!(!barbearias.exists_by_id(a).await.unwrap());
    assert!(clientes.find_by_barbearia_id(a).await.unwrap().is_empty());
    assert!(servicos.find_by_barbearia_id(a).await.unwrap().is_empty());
    assert!(agendas.find_by_barbearia_id(a).await.unwrap().is_empty());

    let restantes = agendas.find_all().await.unwrap();
    assert_eq!(restantes.len(), 1);
    assert_eq!(restantes[0].id, em_b.id);
    assert_eq!(restantes[0].cliente_id, None);

    // apagar só o cliente também solta as agendas dele
    let d = clientes.save(cliente(None, Some(b))).await.unwrap().id.unwrap();
    let com_d = agendas.save(agenda(dt(2024, 3, 3, 8, 0, 0), Some(b), Some(d))).await.unwrap();
    clientes.delete_by_id(d).await.unwrap();
    let com_d = agendas.find_by_id(com_d.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(com_d.cliente_id, None);
    assert_eq!(com_d.barbearia_id, Some(b));

    banco.descartar().await;
}

#[tokio::test]
async fn documento_repetido_vira_duplicate_tax_id() {
    let Some(banco) = Banco::abrir().await else { return };
    let barbearias = PgBarbeariaRepository::new(banco.pool.clone());
    let clientes = PgClienteRepository::new(banco.pool.clone());

    barbearias.save(barbearia(Some("11.111.111/0001-11"))).await.unwrap();
    let err = barbearias.save(barbearia(Some("11.111.111/0001-11"))).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateTaxId("CNPJ")), "{err:?}");

    let primeiro = clientes.save(cliente(Some("123.456.789-09"), None)).await.unwrap();
    let err = clientes.save(cliente(Some("123.456.789-09"), None)).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateTaxId("CPF")), "{err:?}");

    // no UPDATE também
    let mut outro = clientes.save(cliente(Some("987.654.321-00"), None)).await.unwrap();
    outro.cpf = primeiro.cpf.clone();
    let err = clientes.save(outro).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateTaxId("CPF")), "{err:?}");

    banco.descartar().await;
}

#[tokio::test]
async fn referencia_inexistente_vira_erro_de_entrada() {
    let Some(banco) = Banco::abrir().await else { return };
    let barbearias = PgBarbeariaRepository::new(banco.pool.clone());
    let clientes = PgClienteRepository::new(banco.pool.clone());
    let servicos = PgServicoRepository::new(banco.pool.clone());
    let agendas = PgAgendaRepository::new(banco.pool.clone());

    let err = clientes.save(cliente(None, Some(9999))).await.unwrap_err();
    assert!(matches!(err, AppError::BarbeariaNotFound(9999)), "{err:?}");

    let mut servico = Servico::new("Corte", Decimal::TEN, &[], None, None).unwrap();
    servico.set_barbearia_id(Some(9999));
    let err = servicos.save(servico).await.unwrap_err();
    assert!(matches!(err, AppError::BarbeariaNotFound(9999)), "{err:?}");

    let err = agendas.save(agenda(dt(2024, 1, 1, 9, 0, 0), Some(9999), None)).await.unwrap_err();
    assert!(matches!(err, AppError::BarbeariaNotFound(9999)), "{err:?}");

    let b = barbearias.save(barbearia(None)).await.unwrap().id.unwrap();
    let err = agendas.save(agenda(dt(2024, 1, 1, 9, 0, 0), Some(b), Some(8888))).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "{err:?}");

    assert!(clientes.find_all().await.unwrap().is_empty());
    assert!(servicos.find_all().await.unwrap().is_empty());
    assert!(agendas.find_all().await.unwrap().is_empty());

    banco.descartar().await;
}

#[tokio::test]
async fn periodo_inclui_as_duas_pontas() {
    let Some(banco) = Banco::abrir().await else { return };
    let agendas = PgAgendaRepository::new(banco.pool.clone());

    let inicio = dt(2024, 1, 1, 0, 0, 0);
    let fim = dt(2024, 1, 31, 23, 59, 59);
    for data in [
        dt(2023, 12, 31, 23, 59, 59),
        fim,
        dt(2024, 1, 15, 10, 30, 0),
        inicio,
        dt(2024, 2, 1, 0, 0, 0),
    ] {
        agendas.save(agenda(data, None, None)).await.unwrap();
    }

    let no_mes: Vec<_> = agendas
        .find_by_data_between(inicio, fim)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.data)
        .collect();
    assert_eq!(no_mes, vec![inicio, dt(2024, 1, 15, 10, 30, 0), fim]);

    assert!(agendas.find_by_data_between(fim, inicio).await.unwrap().is_empty());

    banco.descartar().await;
}
