// src/common/policy.rs

use crate::common::error::AppError;

// Papéis conhecidos do sistema. A comparação com o texto livre gravado no
// banco é sensível a maiúsculas: "Admin" NÃO é "admin".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Rancher,
    Vet,
    Cheesemaker,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Role::Admin),
            "rancher" => Some(Role::Rancher),
            "vet" => Some(Role::Vet),
            "cheesemaker" => Some(Role::Cheesemaker),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Ranch,
    Animal,
    HealthRecord,
    Station,
    StationReading,
    Collar,
    CollarPing,
    DairyMilk,
    WellIndex,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Update,
    Delete,
}

// Escopo concedido: tudo (admin) ou apenas os ranchos associados ao usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Owned,
}

impl Scope {
    // O predicado de filtro que os repositórios aplicam nas listagens:
    // `None` = sem filtro de posse, `Some(id)` = restringe via user_ranches.
    pub fn filter_user(self, user_id: i32) -> Option<i32> {
        match self {
            Scope::All => None,
            Scope::Owned => Some(user_id),
        }
    }
}

/// Ponto único de decisão de autorização: (papel, recurso, ação) -> escopo.
///
/// Toda a tabela de acesso vive aqui; handler nenhum compara papel na mão.
/// Papel desconhecido é recusado com 403 uniforme.
pub fn authorize(role: &str, resource: Resource, action: Action) -> Result<Scope, AppError> {
    let role = Role::parse(role).ok_or(AppError::Forbidden)?;

    let allowed = match role {
        // Admin enxerga e mexe em tudo, inclusive usuários.
        Role::Admin => return Ok(Scope::All),

        Role::Rancher => matches!(
            resource,
            Resource::Ranch
                | Resource::Animal
                | Resource::HealthRecord
                | Resource::Station
                | Resource::StationReading
                | Resource::Collar
                | Resource::CollarPing
                | Resource::DairyMilk
                | Resource::WellIndex
        ),

        // Veterinário: mesmos recursos do rancheiro, mas não altera o
        // cadastro dos ranchos em si.
        Role::Vet => match resource {
            Resource::Ranch => action == Action::List,
            Resource::Animal
            | Resource::HealthRecord
            | Resource::Station
            | Resource::StationReading
            | Resource::Collar
            | Resource::CollarPing
            | Resource::DairyMilk
            | Resource::WellIndex => true,
            Resource::User => false,
        },

        // Queijeiro: registros de leite dos ranchos associados, e a
        // listagem desses ranchos.
        Role::Cheesemaker => match resource {
            Resource::DairyMilk => true,
            Resource::Ranch => action == Action::List,
            _ => false,
        },
    };

    if allowed { Ok(Scope::Owned) } else { Err(AppError::Forbidden) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_full_scope_everywhere() {
        for resource in [
            Resource::Ranch,
            Resource::Animal,
            Resource::Collar,
            Resource::DairyMilk,
            Resource::User,
        ] {
            let scope = authorize("admin", resource, Action::Delete).unwrap();
            assert_eq!(scope, Scope::All);
            assert_eq!(scope.filter_user(7), None);
        }
    }

    #[test]
    fn rancher_is_scoped_to_owned_ranches() {
        let scope = authorize("rancher", Resource::Animal, Action::List).unwrap();
        assert_eq!(scope, Scope::Owned);
        assert_eq!(scope.filter_user(42), Some(42));
    }

    #[test]
    fn rancher_cannot_manage_users() {
        assert!(matches!(
            authorize("rancher", Resource::User, Action::Delete),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn vet_reads_ranches_but_does_not_mutate_them() {
        assert!(authorize("vet", Resource::Ranch, Action::List).is_ok());
        assert!(authorize("vet", Resource::Ranch, Action::Update).is_err());
        assert!(authorize("vet", Resource::HealthRecord, Action::Create).is_ok());
    }

    #[test]
    fn cheesemaker_only_touches_milk() {
        assert!(authorize("cheesemaker", Resource::DairyMilk, Action::Create).is_ok());
        assert!(authorize("cheesemaker", Resource::Ranch, Action::List).is_ok());
        assert!(authorize("cheesemaker", Resource::Animal, Action::List).is_err());
        assert!(authorize("cheesemaker", Resource::WellIndex, Action::List).is_err());
    }

    #[test]
    fn unknown_and_miscased_roles_are_rejected() {
        assert!(authorize("", Resource::Animal, Action::List).is_err());
        assert!(authorize("Admin", Resource::Animal, Action::List).is_err());
        assert!(authorize("ADMIN", Resource::User, Action::Delete).is_err());
        assert!(authorize("shepherd", Resource::Animal, Action::List).is_err());
    }
}
