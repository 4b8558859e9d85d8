use super::*;
use acct_core::ID;
use acct_core::Unique;
use actix_web::HttpResponse;
use actix_web::web;

/// Resolves the caller's record and runs the policy before any mutation.
async fn permit<D>(directory: &D, auth: &Auth, operation: Operation) -> Result<Account, AuthError>
where
    D: Directory,
{
    let caller = auth.caller().resolve(directory).await?;
    if let Err(e) = policy::authorize(operation, caller.as_ref()).into_result() {
        log::warn!("denied {:?} for account {}: {}", operation, auth.user(), e);
        return Err(e);
    }
    caller.ok_or(AuthError::Forbidden(Entitlement::Account))
}

pub async fn register<D>(
    db: web::Data<D>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AuthError>
where
    D: Directory + 'static,
{
    policy::authorize(Operation::Register, None).into_result()?;
    req.validate()?;
    let hashword = password::hash(&req.password)?;
    let account = Account::new(req.name.trim().to_string(), req.email.clone(), hashword);
    let account = db.insert(account).await?;
    log::info!("registered account {}", account.id());
    Ok(HttpResponse::Created().json(Profile::from(&account)))
}

pub async fn login<D>(
    db: web::Data<D>,
    tokens: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError>
where
    D: Directory + 'static,
{
    match session::issue(db.get_ref(), &tokens, &req.email, &req.password).await {
        Ok(token) => Ok(HttpResponse::Ok().json(TokenResponse { token })),
        Err(e) => {
            log::info!("rejected login: {}", e);
            Err(e)
        }
    }
}

pub async fn list<D>(db: web::Data<D>, auth: Auth) -> Result<HttpResponse, AuthError>
where
    D: Directory + 'static,
{
    permit(db.get_ref(), &auth, Operation::List).await?;
    let accounts = db.list().await?;
    Ok(HttpResponse::Ok().json(accounts.iter().map(Profile::from).collect::<Vec<_>>()))
}

pub async fn profile<D>(db: web::Data<D>, auth: Auth) -> Result<HttpResponse, AuthError>
where
    D: Directory + 'static,
{
    let account = permit(db.get_ref(), &auth, Operation::Profile).await?;
    Ok(HttpResponse::Ok().json(Profile::from(&account)))
}

pub async fn update<D>(
    db: web::Data<D>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    req: web::Json<UpdateRequest>,
) -> Result<HttpResponse, AuthError>
where
    D: Directory + 'static,
{
    let target: ID<Account> = ID::from(path.into_inner());
    let caller = permit(db.get_ref(), &auth, Operation::Update(target)).await?;
    // non-admins only pass Update on themselves, so an unchanged flag is no grant
    if req.admin.is_some_and(|admin| admin != caller.is_admin()) {
        permit(db.get_ref(), &auth, Operation::Grant).await?;
    }
    req.validate()?;
    let req = req.into_inner();
    let hashword = match req.password {
        Some(ref plaintext) => Some(password::hash(plaintext)?),
        None => None,
    };
    let patch = Patch {
        name: req.name.map(|n| n.trim().to_string()),
        email: req.email,
        hashword,
        admin: req.admin,
    };
    let account = db.update(target, &patch).await?.ok_or(AuthError::NotFound)?;
    log::info!("account {} updated by {}", target, auth.user());
    Ok(HttpResponse::Ok().json(Profile::from(&account)))
}

pub async fn remove<D>(
    db: web::Data<D>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, AuthError>
where
    D: Directory + 'static,
{
    let target: ID<Account> = ID::from(path.into_inner());
    permit(db.get_ref(), &auth, Operation::Delete(target)).await?;
    match db.remove(target).await? {
        true => {
            log::info!("account {} deleted by {}", target, auth.user());
            Ok(HttpResponse::NoContent().finish())
        }
        false => Err(AuthError::NotFound),
    }
}
