//! Interface de linha de comando do WashBay baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] e flags globais
//! (--no-loyalty, --json, --verbose, --pay, --receipt).

use clap::{Parser, Subcommand, ValueEnum};

use crate::lifecycle::{Job, JobStatus, PaymentMethod};
use crate::records::Role;
use crate::store::PaymentPrompt;

/// WashBay: fila de jobs, clientes e números do dia de um lava-jato.
#[derive(Debug, Parser)]
#[command(name = "washbay", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Não concede pontos de fidelidade aos novos jobs.
    #[arg(long, global = true, default_value_t = false)]
    pub no_loyalty: bool,

    /// Imprime JSON em vez de tabelas.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Forma de pagamento dos jobs concluídos. `decline` mantém o job concluído.
    #[arg(long, global = true, value_enum, default_value_t = PaymentArg::Cash)]
    pub pay: PaymentArg,

    /// Prepara o link de recibo para o chat após o pagamento.
    #[arg(long, global = true, default_value_t = false)]
    pub receipt: bool,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    Cash,
    Momo,
    Telecel,
    Card,
    Split,
    /// Recusa o pagamento; o job continua concluído.
    Decline,
}

impl PaymentArg {
    pub fn method(self) -> Option<PaymentMethod> {
        match self {
            PaymentArg::Cash => Some(PaymentMethod::Cash),
            PaymentArg::Momo => Some(PaymentMethod::MtnMomo),
            PaymentArg::Telecel => Some(PaymentMethod::TelecelCash),
            PaymentArg::Card => Some(PaymentMethod::Card),
            PaymentArg::Split => Some(PaymentMethod::Split),
            PaymentArg::Decline => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Queued,
    Washing,
    Drying,
    Completed,
    Paid,
}

impl From<StatusArg> for JobStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Queued => JobStatus::Queued,
            StatusArg::Washing => JobStatus::Washing,
            StatusArg::Drying => JobStatus::Drying,
            StatusArg::Completed => JobStatus::Completed,
            StatusArg::Paid => JobStatus::Paid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Attendant,
    Manager,
    Cashier,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Attendant => Role::Attendant,
            RoleArg::Manager => Role::Manager,
            RoleArg::Cashier => Role::Cashier,
        }
    }
}

/// Responde às confirmações de pagamento a partir das flags.
#[derive(Debug, Clone, Copy)]
pub struct FlagPrompt {
    pub pay: PaymentArg,
    pub receipt: bool,
}

impl PaymentPrompt for FlagPrompt {
    fn confirm_payment(&self, _job: &Job) -> Option<PaymentMethod> {
        self.pay.method()
    }

    fn wants_receipt(&self, _job: &Job) -> bool {
        self.receipt
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Executa a demonstração de um dia: entrada, lavagem, pagamento e painel.
    Demo,

    /// Mostra a fila ao vivo.
    Queue,

    /// Mostra a receita e os serviços mais pedidos.
    Report {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Lista ou busca clientes, cadastrando um antes se pedido.
    Customers {
        /// Busca por nome, telefone ou placa.
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Nome do cliente a cadastrar; exige --phone.
        #[arg(long, requires = "phone")]
        add: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        plate: Option<String>,

        /// Cadastra um cliente avulso só pelo telefone.
        #[arg(long, conflicts_with = "add")]
        walk_in: Option<String>,
    },

    /// Mostra preços e equipe, aplicando antes as alterações pedidas.
    Settings {
        /// Novo preço de um serviço, no formato ID=AMOUNT. Pode repetir.
        #[arg(long = "price", value_name = "ID=AMOUNT")]
        prices: Vec<String>,

        /// Convida um membro da equipe pelo nome; exige --email.
        #[arg(long, requires = "email")]
        invite: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, value_enum, default_value_t = RoleArg::Attendant)]
        role: RoleArg,

        /// Remove um funcionário pelo id. Pode repetir.
        #[arg(long)]
        remove: Vec<String>,
    },

    /// Define o status de um job diretamente, fora da ordem normal.
    Override {
        job: String,

        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Lista as despesas registradas.
    Expenses {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Asks for today's business insight.
    Insight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_customers_subcommand() {
        let cli = Cli::parse_from(["washbay", "customers", "--search", "ama", "--page", "2"]);
        match cli.command {
            Command::Customers {
                search,
                page,
                add,
                ..
            } => {
                assert_eq!(search.as_deref(), Some("ama"));
                assert_eq!(page, 2);
                assert_eq!(add, None);
            }
            _ => panic!("expected Customers command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "washbay",
            "--no-loyalty",
            "--pay",
            "momo",
            "--receipt",
            "--verbose",
            "demo",
        ]);
        assert!(cli.no_loyalty);
        assert!(cli.receipt);
        assert!(cli.verbose);
        assert_eq!(cli.pay, PaymentArg::Momo);
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["washbay", "report"]);
        assert!(!cli.no_loyalty);
        assert!(!cli.json);
        assert_eq!(cli.pay, PaymentArg::Cash);
        assert!(matches!(cli.command, Command::Report { page: 1 }));
    }

    #[test]
    fn declining_flag_maps_to_no_method() {
        assert_eq!(PaymentArg::Decline.method(), None);
        assert_eq!(PaymentArg::Telecel.method(), Some(PaymentMethod::TelecelCash));
    }

    #[test]
    fn cli_parses_settings_edits() {
        let cli = Cli::parse_from([
            "washbay",
            "settings",
            "--price",
            "s2=55",
            "--price",
            "s4=60",
            "--invite",
            "Yaw",
            "--email",
            "yaw@washbay.com",
            "--role",
            "cashier",
            "--remove",
            "w3",
        ]);
        match cli.command {
            Command::Settings {
                prices,
                invite,
                email,
                role,
                remove,
            } => {
                assert_eq!(prices, vec!["s2=55", "s4=60"]);
                assert_eq!(invite.as_deref(), Some("Yaw"));
                assert_eq!(email.as_deref(), Some("yaw@washbay.com"));
                assert_eq!(Role::from(role), Role::Cashier);
                assert_eq!(remove, vec!["w3"]);
            }
            _ => panic!("expected Settings command"),
        }
    }

    #[test]
    fn invite_without_email_is_rejected() {
        let res = Cli::try_parse_from(["washbay", "settings", "--invite", "Yaw"]);
        assert!(res.is_err());
    }

    #[test]
    fn cli_parses_override() {
        let cli = Cli::parse_from(["washbay", "override", "job-001", "washing"]);
        match cli.command {
            Command::Override { job, status } => {
                assert_eq!(job, "job-001");
                assert_eq!(JobStatus::from(status), JobStatus::Washing);
            }
            _ => panic!("expected Override command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
